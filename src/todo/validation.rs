//! Name rules shared by every backend. Validation always runs before the
//! store is touched; a failing name never reaches persistence.

use thiserror::Error;

use std::ops::RangeInclusive;

pub const NAME_LENGTH: RangeInclusive<usize> = 1..=100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("List name must be between 1 and 100 characters.")]
    ListNameLength,

    #[error("List name must be unique.")]
    ListNameTaken,

    #[error("Todo must be between 1 and 100 characters.")]
    TodoNameLength,
}

fn has_valid_length(name: &str) -> bool {
    NAME_LENGTH.contains(&name.chars().count())
}

/// Checks a list name against the length rule and the names already in use.
/// Returns the trimmed name, which is what gets stored.
pub fn validate_list_name<'a, I, S>(name: &'a str, existing_names: I) -> Result<&'a str, NameError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let name = name.trim();

    if !has_valid_length(name) {
        return Err(NameError::ListNameLength);
    }

    if existing_names
        .into_iter()
        .any(|existing| existing.as_ref() == name)
    {
        return Err(NameError::ListNameTaken);
    }

    Ok(name)
}

/// Returns the trimmed todo name.
pub fn validate_todo_name(name: &str) -> Result<&str, NameError> {
    let name = name.trim();

    if has_valid_length(name) {
        Ok(name)
    } else {
        Err(NameError::TodoNameLength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NO_NAMES: [&str; 0] = [];

    #[test]
    fn list_name_is_trimmed() {
        assert_eq!(validate_list_name("  Groceries \n", NO_NAMES), Ok("Groceries"));
    }

    #[test]
    fn empty_and_blank_list_names_fail_length() {
        assert_eq!(validate_list_name("", NO_NAMES), Err(NameError::ListNameLength));
        assert_eq!(validate_list_name(" \t ", NO_NAMES), Err(NameError::ListNameLength));
    }

    #[test]
    fn duplicate_list_name_is_rejected_case_sensitively() {
        let names = ["Errands", "Groceries"];

        assert_eq!(validate_list_name(" Errands ", names), Err(NameError::ListNameTaken));
        assert_eq!(validate_list_name("errands", names), Ok("errands"));
    }

    #[test]
    fn length_is_checked_before_uniqueness() {
        assert_eq!(validate_list_name("   ", [""]), Err(NameError::ListNameLength));
    }

    #[test]
    fn blank_todo_fails_length() {
        assert_eq!(validate_todo_name("   "), Err(NameError::TodoNameLength));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let name = "é".repeat(100);
        assert_eq!(validate_todo_name(&name), Ok(name.as_str()));
        assert!(validate_todo_name(&"é".repeat(101)).is_err());
    }

    #[test]
    fn messages_match_what_users_see() {
        assert_eq!(
            NameError::ListNameLength.to_string(),
            "List name must be between 1 and 100 characters."
        );
        assert_eq!(NameError::ListNameTaken.to_string(), "List name must be unique.");
        assert_eq!(
            NameError::TodoNameLength.to_string(),
            "Todo must be between 1 and 100 characters."
        );
    }

    proptest! {
        #[test]
        fn names_within_bounds_pass(name in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,98}[a-zA-Z0-9]?") {
            prop_assert_eq!(validate_todo_name(&name), Ok(name.trim()));
            prop_assert_eq!(validate_list_name(&name, NO_NAMES), Ok(name.trim()));
        }

        #[test]
        fn names_too_long_fail(name in "[a-z]{101,150}", pad in " {0,5}") {
            let padded = format!("{pad}{name}{pad}");
            prop_assert_eq!(validate_todo_name(&padded), Err(NameError::TodoNameLength));
            prop_assert_eq!(validate_list_name(&padded, NO_NAMES), Err(NameError::ListNameLength));
        }

        #[test]
        fn whitespace_only_names_fail(name in "[ \t\n]{0,20}") {
            prop_assert_eq!(validate_todo_name(&name), Err(NameError::TodoNameLength));
        }
    }
}
