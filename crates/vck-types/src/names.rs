//! Ref name validation following git-style conventions.
//!
//! Valid ref names:
//! - Must be non-empty
//! - Must not start with `-` (it would be read as a git option)
//! - Must not contain whitespace, `~`, `^`, `:`, `?`, `*`, `[`, `\`
//! - Must not contain `..` (double dot) or `@{`
//! - Must not start or end with `.` or `/`
//! - Must not end with `.lock`
//! - Components between slashes must be non-empty and not start with `.`

use crate::error::{Result, TypeError};
use crate::refs::RefKind;

/// Characters that are forbidden anywhere in a ref name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '~', '^', ':', '?', '*', '[', '\\'];

fn invalid(kind: &'static str, name: &str, reason: impl Into<String>) -> TypeError {
    TypeError::InvalidRefName {
        kind,
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a branch or tag name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use vck_types::{validate_ref_name, RefKind};
///
/// assert!(validate_ref_name(RefKind::Branch, "2017.7").is_ok());
/// assert!(validate_ref_name(RefKind::Tag, "v2017.7.2").is_ok());
/// assert!(validate_ref_name(RefKind::Branch, "").is_err());
/// assert!(validate_ref_name(RefKind::Branch, "bad..name").is_err());
/// ```
pub fn validate_ref_name(kind: RefKind, name: &str) -> Result<()> {
    let label = kind.as_str();

    if name.is_empty() {
        return Err(invalid(label, name, "must not be empty"));
    }

    if name.starts_with('-') {
        return Err(invalid(label, name, "must not start with '-'"));
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(
                label,
                name,
                format!("contains forbidden character: {ch:?}"),
            ));
        }
    }

    if name.contains("..") {
        return Err(invalid(label, name, "must not contain '..'"));
    }

    if name.contains("@{") {
        return Err(invalid(label, name, "must not contain '@{'"));
    }

    if name.starts_with('.') || name.ends_with('.') {
        return Err(invalid(label, name, "must not start or end with '.'"));
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid(label, name, "must not start or end with '/'"));
    }

    if name.ends_with(".lock") {
        return Err(invalid(label, name, "must not end with '.lock'"));
    }

    for component in name.split('/') {
        if component.is_empty() {
            return Err(invalid(label, name, "path components must not be empty"));
        }
        if component.starts_with('.') {
            return Err(invalid(
                label,
                name,
                format!("component must not start with '.': {component:?}"),
            ));
        }
    }

    Ok(())
}

/// Validate a remote name. Must be a simple identifier (no slashes).
pub fn validate_remote_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid("remote", name, "must not be empty"));
    }
    if name.starts_with('-') {
        return Err(invalid("remote", name, "must not start with '-'"));
    }
    if name.contains('/') {
        return Err(invalid("remote", name, "must not contain '/'"));
    }
    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(
                "remote",
                name,
                format!("contains forbidden character: {ch:?}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(name: &str) -> Result<()> {
        validate_ref_name(RefKind::Branch, name)
    }

    #[test]
    fn valid_release_names() {
        assert!(branch("2017.7").is_ok());
        assert!(branch("develop").is_ok());
        assert!(validate_ref_name(RefKind::Tag, "v2016.11.8").is_ok());
    }

    #[test]
    fn valid_nested_names() {
        assert!(branch("feature/auth").is_ok());
        assert!(branch("user/alice/fix-123").is_ok());
    }

    #[test]
    fn reject_empty_name() {
        assert!(branch("").is_err());
    }

    #[test]
    fn reject_option_like_name() {
        assert!(branch("--upload-pack=x").is_err());
        assert!(validate_remote_name("-o").is_err());
    }

    #[test]
    fn reject_double_dot() {
        assert!(branch("bad..name").is_err());
    }

    #[test]
    fn reject_whitespace_and_forbidden_chars() {
        for name in ["has space", "has\ttab", "a~b", "a^b", "a:b", "a?b", "a*b", "a[b", "a\\b"] {
            assert!(branch(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn reject_boundaries() {
        assert!(branch(".hidden").is_err());
        assert!(branch("trailing.").is_err());
        assert!(branch("/leading").is_err());
        assert!(branch("trailing/").is_err());
        assert!(branch("a//b").is_err());
        assert!(branch("feature/.hidden").is_err());
    }

    #[test]
    fn reject_lock_suffix_and_reflog_syntax() {
        assert!(branch("main.lock").is_err());
        assert!(branch("ref@{0}").is_err());
    }

    #[test]
    fn error_names_the_kind() {
        let err = validate_ref_name(RefKind::Tag, "").unwrap_err();
        assert!(err.to_string().starts_with("invalid tag name"));
    }

    #[test]
    fn remote_names() {
        assert!(validate_remote_name("origin").is_ok());
        assert!(validate_remote_name("").is_err());
        assert!(validate_remote_name("up/stream").is_err());
    }
}
