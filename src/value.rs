use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    PosInt(u64),
    NegInt(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::PosInt(n) => *n as f64,
            Self::NegInt(n) => *n as f64,
            Self::Float(n) => *n,
        }
    }
}

/// A location in the source document. Lines and columns are 1-based,
/// columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Where an object entry sits in the source: the position of its key and
/// the position of the first character of its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyValuePosition {
    pub key: Position,
    pub value: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(AttributedList),
    Object(AttributedDict),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&AttributedList> {
        match self {
            Self::Array(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&AttributedDict> {
        match self {
            Self::Object(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn unwrap_number(&self) -> &Number {
        self.as_number().expect("value is not a number")
    }

    pub fn unwrap_str(&self) -> &str {
        self.as_str().expect("value is not a string")
    }

    pub fn unwrap_array(&self) -> &AttributedList {
        self.as_array().expect("value is not an array")
    }

    pub fn unwrap_object(&self) -> &AttributedDict {
        self.as_object().expect("value is not an object")
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    key: String,
    value: Value,
    position: KeyValuePosition,
}

/// An object in source order. Every key owns exactly one [`KeyValuePosition`];
/// a duplicate key in the source overwrites both the value and the position
/// but keeps the slot of the first occurrence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributedDict {
    entries: Vec<Entry>,
}

impl AttributedDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: Value, position: KeyValuePosition) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.value = value;
                entry.position = position;
            }
            None => self.entries.push(Entry {
                key,
                value,
                position,
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.value)
    }

    pub fn attributes(&self, key: &str) -> Option<&KeyValuePosition> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }
}

/// An array in source order, each element paired with the [`Position`] where
/// it began. The value list and the position list always have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributedList {
    values: Vec<Value>,
    positions: Vec<Position>,
}

impl AttributedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value, position: Position) {
        self.values.push(value);
        self.positions.push(position);
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn attributes(&self, index: usize) -> Option<&Position> {
        self.positions.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}

pub type ParseResult = Result<Value, ParseError>;
