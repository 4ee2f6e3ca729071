use thiserror::Error;
use url::{ParseError, Url};

/// Longest custom short code accepted
pub const MAX_SHORT_CODE_LENGTH: usize = 20;

/// Longest destination URL accepted, in bytes
pub const MAX_URL_LENGTH: usize = 2083;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodeValidationError {
    #[error("Custom code must be 1-20 characters")]
    Empty,
    #[error("Custom code must be 1-{max} characters (got {len})")]
    TooLong { len: usize, max: usize },
    #[error("Custom code can only contain letters, numbers, hyphens, and underscores")]
    InvalidCharacter { ch: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UrlValidationError {
    #[error("URL cannot be empty")]
    Empty,
    #[error("URL exceeds 2083 characters")]
    TooLong,
    #[error("URL is not a valid absolute URL")]
    Malformed,
    #[error("URL scheme must be http or https")]
    UnsupportedScheme,
    #[error("URL must include a host")]
    MissingHost,
}

fn is_short_code_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// Check a caller-supplied short code against the length and charset rules
pub fn validate_short_code(code: &str) -> Result<(), CodeValidationError> {
    if code.is_empty() {
        return Err(CodeValidationError::Empty);
    }

    if let Some(ch) = code.chars().find(|&ch| !is_short_code_char(ch)) {
        return Err(CodeValidationError::InvalidCharacter { ch });
    }

    // Every accepted char is ASCII, so byte length equals char count here
    if code.len() > MAX_SHORT_CODE_LENGTH {
        return Err(CodeValidationError::TooLong {
            len: code.len(),
            max: MAX_SHORT_CODE_LENGTH,
        });
    }

    Ok(())
}

/// Check that `raw` is an absolute http(s) URL with a host, written out in
/// full as `scheme://authority...`
pub fn validate_url(raw: &str) -> Result<(), UrlValidationError> {
    if raw.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if raw.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    // The parser strips surrounding whitespace and embedded tabs/newlines,
    // but the raw text is what gets stored and sent back as `Location`
    if raw.trim() != raw || raw.chars().any(char::is_control) {
        return Err(UrlValidationError::Malformed);
    }

    let parsed = Url::parse(raw).map_err(|e| match e {
        ParseError::EmptyHost => UrlValidationError::MissingHost,
        _ => UrlValidationError::Malformed,
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlValidationError::UnsupportedScheme);
    }

    // `http:host`, `https:/host` and `https:\\host` all parse, but only after
    // the parser repairs them; as raw text they are relative references
    match raw.split_once(':') {
        Some((_, rest)) if rest.starts_with("//") => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
