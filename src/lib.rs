#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::needless_doctest_main)]
//! This crate is a lenient ("dirty") JSON parser: it accepts standard JSON plus the relaxations
//! commonly found in hand-written or machine-mangled JSON-like text, and it records the line and
//! column number of every object key and array element for diagnostics.
//!
//! ## What does it tolerate ?
//!
//! - Single-quoted strings (`{'a': 'b'}`)
//! - Unquoted object keys (`{key: 1}`)
//! - `//` and `/* */` comments anywhere whitespace is allowed
//! - Hexadecimal integers (`0x1F`) and legacy leading-zero octal (`010`)
//! - The constants `NaN`, `Infinity` and `-Infinity`
//! - Bare arithmetic expressions (`(1+2)*3`) evaluated with a small sandboxed
//!   recursive-descent evaluator, never a general-purpose one
//!
//! Leniency is grammar widening, not error swallowing: anything the widened grammar still cannot
//! match fails with a [`error::ParseError`] carrying the exact offset, line and column.
//!
//! ## Parsing
//!
//! ```rust
//! use dirty_json_parser::parse;
//!
//! fn main() {
//!     let value = parse("{unquoted: 'hi', // comment\n  n: 0x1F}").unwrap();
//!
//!     let object = value.unwrap_object();
//!     assert_eq!(object.get("unquoted").unwrap().as_str(), Some("hi"));
//!     assert_eq!(object.attributes("n").unwrap().key.line, 2);
//! }
//! ```
//!
//! ## Extracting embedded fragments
//!
//! [`Parser::decode`] can seek to the first `[` or `{` of a document, which lets you pull a
//! JSON-like fragment out of surrounding prose, and [`Parser::pos`] tells you where a decode
//! stopped so several top-level values can be read one after another.
//!
//! ```rust
//! use dirty_json_parser::Parser;
//!
//! fn main() {
//!     let log_line = "WARN dropped payload {\"id\": 3, \"ok\": false}";
//!
//!     let value = Parser::new(log_line).decode(true, 0).unwrap();
//!
//!     assert_eq!(value.unwrap_object().len(), 2);
//! }
//! ```
//!
//! ## Serializing
//!
//! The decoded tree implements [serde](https://serde.rs/) `Serialize` (values only, position
//! attributes are parse-time diagnostics), so it can be re-serialized strictly through
//! `serde_json` or deserialized into any struct implementing `Deserialize`.

extern crate bytecount;
extern crate memchr;
extern crate nom;
extern crate serde;

mod cursor;
mod encoding;
mod expr;
mod parser;
mod ser;

pub mod error;
pub mod value;

pub use parser::{
    default_parse_constant, default_parse_float, default_parse_int, parse, Parser, ParserConfig,
};
