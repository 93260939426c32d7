//! Argument value parsers
//!
//! Turns delimiter names like "tab" or "semicolon" into the single character
//! the feature file reader expects.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty delimiter")]
    EmptyInput,

    #[error("Delimiter must be a single ASCII character or a known name, got: {input}")]
    InvalidDelimiter { input: String },
}

/// Parse a delimiter argument
///
/// Accepts a single ASCII character (`,` `;` `|` ...), the escape `\t`, or
/// one of the names `comma`, `semicolon`, `tab`, `space`, `pipe`.
///
/// # Errors
///
/// Returns `ParseError` if the input is empty, longer than one character
/// and not a known name, or not ASCII.
pub fn parse_delimiter(input: &str) -> Result<char, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let named = match input.to_ascii_lowercase().as_str() {
        "comma" => Some(','),
        "semicolon" => Some(';'),
        "tab" | "\\t" => Some('\t'),
        "space" => Some(' '),
        "pipe" => Some('|'),
        _ => None,
    };
    if let Some(delimiter) = named {
        return Ok(delimiter);
    }

    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) if delimiter.is_ascii() => Ok(delimiter),
        _ => Err(ParseError::InvalidDelimiter {
            input: input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_characters() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter(";").unwrap(), ';');
        assert_eq!(parse_delimiter("|").unwrap(), '|');
    }

    #[test]
    fn test_named_delimiters() {
        assert_eq!(parse_delimiter("comma").unwrap(), ',');
        assert_eq!(parse_delimiter("TAB").unwrap(), '\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("space").unwrap(), ' ');
        assert_eq!(parse_delimiter("Semicolon").unwrap(), ';');
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_delimiter(""), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_invalid_delimiters() {
        assert!(matches!(
            parse_delimiter(",,"),
            Err(ParseError::InvalidDelimiter { .. })
        ));
        assert!(matches!(
            parse_delimiter("§"),
            Err(ParseError::InvalidDelimiter { .. })
        ));
    }
}
