use std::sync::LazyLock;

use regex::Regex;

/// Something before an `@`, then a dot-separated part after it.
///
/// Unanchored: a token passes when any substring has this shape.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^@]+@[^.]+\.[^.]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    #[error("Required")]
    Required,

    #[error("{0} is not a valid email")]
    Invalid(String),
}

/// Splits on runs of whitespace, dropping empty tokens.
pub fn split_emails(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_owned).collect()
}

pub fn is_valid_email(token: &str) -> bool {
    EMAIL_REGEX.is_match(token)
}

/// Tokens in input order, or the first problem found.
pub fn validate_emails(input: &str) -> Result<Vec<String>, EmailValidationError> {
    let emails = split_emails(input);
    if emails.is_empty() {
        return Err(EmailValidationError::Required);
    }

    if let Some(bad) = emails.iter().find(|email| !is_valid_email(email)) {
        return Err(EmailValidationError::Invalid(bad.clone()));
    }

    Ok(emails)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_valid_tokens() {
        assert_eq!(
            validate_emails("a@b.c d@e.f").unwrap(),
            vec!["a@b.c".to_owned(), "d@e.f".to_owned()]
        );
    }

    #[test]
    fn mixed_whitespace_separators() {
        assert_eq!(
            validate_emails("  a@b.c\n\td@e.f   \r\n g@h.i ").unwrap().len(),
            3
        );
    }

    #[test]
    fn blank_is_required() {
        assert_eq!(validate_emails(""), Err(EmailValidationError::Required));
        assert_eq!(validate_emails("   \n\t"), Err(EmailValidationError::Required));
        assert_eq!(EmailValidationError::Required.to_string(), "Required");
    }

    #[test]
    fn invalid_token_message() {
        let err = validate_emails("not-an-email").unwrap_err();
        assert_eq!(err.to_string(), "not-an-email is not a valid email");
    }

    #[test]
    fn first_invalid_token_wins() {
        let err = validate_emails("a@b.c first-bad second-bad").unwrap_err();
        assert_eq!(err, EmailValidationError::Invalid("first-bad".to_owned()));

        let err = validate_emails("a@b.c bad@@").unwrap_err();
        assert_eq!(err.to_string(), "bad@@ is not a valid email");
    }

    #[test]
    fn pattern_is_permissive() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@example.co.uk"));
        assert!(is_valid_email("<a@b.c>"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
    }
}
