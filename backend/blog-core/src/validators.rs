//! Field-level validation rules
//!
//! Custom validators referenced by the draft models, plus the comment word
//! filter. The filter is token-exact: the text is lowercased, a fixed set of
//! punctuation characters is normalized to whitespace, and the resulting
//! whitespace-separated tokens are compared against the block-list. A
//! blocked word inside a longer word does not match.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Words that may not appear in comment text as standalone tokens.
const FORBIDDEN_TOKENS: &[&str] = &["бля", "кумкват"];

/// Punctuation normalized to whitespace before tokenizing.
const SEPARATORS: &[char] = &['.', ',', '/', ';', ':', '!', '?', '"'];

/// Usernames and group slugs share the URL-safe shape.
static SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid slug regex"));

/// Return the first blocked token found in `text`, if any.
pub fn forbidden_token(text: &str) -> Option<&'static str> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();

    for token in normalized.split_whitespace() {
        if let Some(hit) = FORBIDDEN_TOKENS.iter().find(|&&w| w == token) {
            return Some(hit);
        }
    }
    None
}

/// Validator hook for `NewComment::text`.
pub fn comment_text_is_clean(text: &str) -> Result<(), ValidationError> {
    match forbidden_token(text) {
        None => Ok(()),
        Some(_) => {
            let mut err = ValidationError::new("forbidden_token");
            err.message = Some("comment contains a blocked word".into());
            Err(err)
        }
    }
}

/// Validator hook for `NewGroup::slug`.
pub fn slug_is_url_safe(slug: &str) -> Result<(), ValidationError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_shape");
        err.message = Some("slug may only contain letters, digits, '-' and '_'".into());
        Err(err)
    }
}

/// Validator hook for `NewUser::username`.
pub fn username_is_well_formed(username: &str) -> Result<(), ValidationError> {
    if SLUG_REGEX.is_match(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_shape");
        err.message = Some("username may only contain letters, digits, '-' and '_'".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewComment;
    use validator::Validate;

    #[test]
    fn clean_text_passes() {
        assert_eq!(forbidden_token("a perfectly ordinary comment"), None);
    }

    #[test]
    fn exact_token_is_blocked() {
        assert_eq!(forbidden_token("кумкват"), Some("кумкват"));
    }

    #[test]
    fn blocked_token_is_case_insensitive() {
        assert_eq!(forbidden_token("КумКват"), Some("кумкват"));
    }

    #[test]
    fn punctuation_does_not_hide_a_token() {
        assert_eq!(forbidden_token("ну, кумкват!"), Some("кумкват"));
        assert_eq!(forbidden_token("кумкват?вот"), Some("кумкват"));
    }

    #[test]
    fn token_inside_a_longer_word_is_allowed() {
        // substring match is not enough; only whole tokens count
        assert_eq!(forbidden_token("кумкватовый сад"), None);
    }

    #[test]
    fn unlisted_punctuation_is_not_a_separator() {
        // '-' is not in the separator set, so this stays one token
        assert_eq!(forbidden_token("кумкват-сад"), None);
    }

    #[test]
    fn new_comment_draft_rejects_blocked_word() {
        let draft = NewComment {
            text: "Кумкват.".to_string(),
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("text"));
    }

    #[test]
    fn new_comment_draft_accepts_clean_text() {
        let draft = NewComment {
            text: "looks great".to_string(),
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn slug_shape_rules() {
        assert!(slug_is_url_safe("rust-posts_2024").is_ok());
        assert!(slug_is_url_safe("no spaces").is_err());
        assert!(slug_is_url_safe("no/slash").is_err());
    }

    #[test]
    fn username_shape_rules() {
        assert!(username_is_well_formed("alice_01").is_ok());
        assert!(username_is_well_formed("bad name").is_err());
    }
}
