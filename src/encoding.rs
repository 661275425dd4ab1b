use crate::error::{Kind, ParseError};

/// Validation gate for an optional encoding name. The document is never
/// transformed: a character outside the encoding's repertoire is rejected
/// up front, before any parsing happens.
pub fn validate(document: &str, encoding: &str) -> Result<(), ParseError> {
    match encoding.to_ascii_lowercase().as_str() {
        // Rust strings are UTF-8 already
        "utf-8" | "utf8" => Ok(()),
        "ascii" => check(document, encoding, |c| c.is_ascii()),
        "latin1" | "latin-1" | "binary" => check(document, encoding, |c| (c as u32) <= 0xff),
        _ => Err(ParseError::new(
            Kind::InvalidEncoding(encoding.to_string()),
            "",
            0,
        )),
    }
}

fn check(
    document: &str,
    encoding: &str,
    survives: impl Fn(char) -> bool,
) -> Result<(), ParseError> {
    match document.chars().find(|c| !survives(*c)) {
        None => Ok(()),
        Some(character) => Err(ParseError::new(
            Kind::NonEncodingCharacter {
                encoding: encoding.to_string(),
                character,
            },
            "",
            0,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::error::Kind;

    #[test]
    fn ascii_rejects_the_first_wide_character() {
        assert!(validate("{\"a\": 1}", "ascii").is_ok());

        let err = validate("{\"a\": \"é\"}", "ascii").unwrap_err();
        assert_eq!(
            err.kind,
            Kind::NonEncodingCharacter {
                encoding: "ascii".into(),
                character: 'é'
            }
        );
        assert_eq!(err.pos, 0);
    }

    #[test]
    fn unknown_encoding_name() {
        let err = validate("{}", "utf-99").unwrap_err();
        assert_eq!(err.kind, Kind::InvalidEncoding("utf-99".into()));
    }
}
