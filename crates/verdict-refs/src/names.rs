//! Ref name validation following git-style conventions.
//!
//! Valid names:
//! - Must be non-empty
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..` (double dot)
//! - Must not start or end with `.` or `/`
//! - Must not end with `.lock`
//! - Must not contain consecutive slashes (`//`)

use crate::error::{RefError, RefResult};

/// Characters that are forbidden anywhere in a ref name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

/// Validate a ref name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use verdict_refs::names::validate_ref_name;
///
/// assert!(validate_ref_name("main").is_ok());
/// assert!(validate_ref_name("feature/scoring").is_ok());
/// assert!(validate_ref_name("").is_err());
/// assert!(validate_ref_name("bad..name").is_err());
/// ```
pub fn validate_ref_name(name: &str) -> RefResult<()> {
    let invalid = |reason: &str| RefError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name must not be empty"));
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(&format!("contains forbidden character: {ch:?}")));
        }
    }

    if name.contains("..") {
        return Err(invalid("must not contain '..'"));
    }

    if name.starts_with('.') || name.ends_with('.') {
        return Err(invalid("must not start or end with '.'"));
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid("must not start or end with '/'"));
    }

    if name.ends_with(".lock") {
        return Err(invalid("must not end with '.lock'"));
    }

    if name.contains("//") {
        return Err(invalid("must not contain '//'"));
    }

    Ok(())
}
