//! Input validation helpers. Pure and deterministic; every failure carries
//! the message the client sees.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::ApiError;

static SCHEMED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?[-a-zA-Z0-9]+(\.[a-zA-Z0-9]{1,6})+([/?#][-a-zA-Z0-9()@:%_+.~#?&/=]*)?$")
        .expect("known-good pattern")
});

static BARE_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(www\.)?[-a-zA-Z0-9]+(\.[a-zA-Z0-9]{1,6})+([/?#][-a-zA-Z0-9()@:%_+.~#?&/=]*)?$")
        .expect("known-good pattern")
});

/// Parse a string that must consist entirely of decimal digits.
///
/// Anything else (empty string, sign, whitespace, non-digits, values past
/// i64::MAX) is rejected. Used wherever a client-supplied identifier
/// becomes a database key, so malformed input never reaches the store.
pub fn parse_strict_integer(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Trim and normalize a submitted URL to a fully-qualified form.
///
/// Explicitly schemed input must already be URL-shaped; scheme-less input
/// must be domain-shaped and gets `https://` prepended. Bare domains are
/// accepted for convenience, but only fully-qualified URLs are stored.
pub fn normalize_url(text: &str) -> Result<String, ApiError> {
    let trimmed = text.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        if SCHEMED_URL.is_match(trimmed) {
            Ok(trimmed.to_string())
        } else {
            Err(ApiError::Validation("Invalid URL format.".into()))
        }
    } else if BARE_DOMAIN.is_match(trimmed) {
        Ok(format!("https://{trimmed}"))
    } else {
        Err(ApiError::Validation("Invalid domain format.".into()))
    }
}

/// Check `value` against the inclusive `[min, max]` range, failing rather
/// than silently truncating.
pub fn clamp_take(min: i64, max: i64, value: i64) -> Result<i64, ApiError> {
    if value < min || value > max {
        return Err(ApiError::Validation(format!(
            "'take' argument value '{value}' is outside the valid range of '{min}' to '{max}'."
        )));
    }
    Ok(value)
}

pub fn clamp_skip(value: i64) -> Result<i64, ApiError> {
    if value < 0 {
        return Err(ApiError::Validation(format!(
            "'skip' argument value '{value}' cannot be negative."
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_integer_accepts_digit_strings() {
        assert_eq!(parse_strict_integer("0"), Some(0));
        assert_eq!(parse_strict_integer("42"), Some(42));
        assert_eq!(parse_strict_integer("007"), Some(7));
    }

    #[test]
    fn strict_integer_rejects_everything_else() {
        assert_eq!(parse_strict_integer(""), None);
        assert_eq!(parse_strict_integer("-1"), None);
        assert_eq!(parse_strict_integer("+1"), None);
        assert_eq!(parse_strict_integer(" 1"), None);
        assert_eq!(parse_strict_integer("1 "), None);
        assert_eq!(parse_strict_integer("1.5"), None);
        assert_eq!(parse_strict_integer("12a"), None);
        assert_eq!(parse_strict_integer("NaN"), None);
        // all digits, but not representable as a database key
        assert_eq!(parse_strict_integer("99999999999999999999"), None);
    }

    #[test]
    fn bare_domains_get_a_scheme() {
        assert_eq!(
            normalize_url("example.com").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            normalize_url("graphql-yoga.com").unwrap(),
            "https://graphql-yoga.com"
        );
        assert_eq!(
            normalize_url("www.example.com/path").unwrap(),
            "https://www.example.com/path"
        );
    }

    #[test]
    fn schemed_urls_pass_through_unchanged() {
        assert_eq!(
            normalize_url("https://example.com/a?b=1").unwrap(),
            "https://example.com/a?b=1"
        );
        assert_eq!(
            normalize_url("http://www.example.com").unwrap(),
            "http://www.example.com"
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            normalize_url("  example.com  ").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn malformed_domains_are_rejected() {
        let err = normalize_url("not a url").unwrap_err();
        assert!(err.to_string().contains("Invalid domain format."));
        assert!(normalize_url("x").is_err());
        assert!(normalize_url("").is_err());
    }

    #[test]
    fn malformed_schemed_urls_are_rejected() {
        let err = normalize_url("https://not a url").unwrap_err();
        assert!(err.to_string().contains("Invalid URL format."));
        assert!(normalize_url("https://").is_err());
    }

    #[test]
    fn take_is_clamped_inclusively() {
        assert!(clamp_take(1, 50, 0).is_err());
        assert!(clamp_take(1, 50, 51).is_err());
        assert_eq!(clamp_take(1, 50, 1).unwrap(), 1);
        assert_eq!(clamp_take(1, 50, 30).unwrap(), 30);
        assert_eq!(clamp_take(1, 50, 50).unwrap(), 50);
    }

    #[test]
    fn clamp_messages_name_the_bounds() {
        let err = clamp_take(1, 50, 51).unwrap_err().to_string();
        assert!(err.contains("'51'"));
        assert!(err.contains("'1'"));
        assert!(err.contains("'50'"));
    }

    #[test]
    fn skip_must_be_non_negative() {
        assert!(clamp_skip(-1).is_err());
        assert_eq!(clamp_skip(0).unwrap(), 0);
        assert_eq!(clamp_skip(10).unwrap(), 10);
    }
}
