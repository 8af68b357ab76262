//! Name casing projections.
//!
//! A logical name entered by the user ("myLib", "my-lib", "MY_LIB") is
//! projected into every casing the generated artifacts need. All
//! projections are derived from one word split, so a file name, a class
//! name and a property reference produced from the same input can never
//! disagree.

use serde::Serialize;

use crate::domain::error::DomainError;

/// All casing projections of one logical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Names {
    /// The name exactly as supplied.
    pub name: String,
    /// Filesystem-safe kebab-case: `my-lib`.
    pub file_name: String,
    /// Type/symbol-safe PascalCase: `MyLib`.
    pub class_name: String,
    /// Property-safe camelCase: `myLib`.
    pub property_name: String,
    /// SCREAMING_SNAKE_CASE: `MY_LIB`.
    pub constant_name: String,
}

impl Names {
    /// Derive every projection from one name.
    pub fn from_name(name: &str) -> Self {
        let words = split_words(name);
        Self {
            name: name.to_string(),
            file_name: words.join("-"),
            class_name: words.iter().map(|w| capitalize(w)).collect(),
            property_name: words
                .iter()
                .enumerate()
                .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
                .collect(),
            constant_name: words
                .iter()
                .map(|w| w.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

/// Validate a user-supplied project name before any mutation.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if !name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("must start with a letter"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(invalid(
            "only letters, digits, dashes and underscores are allowed",
        ));
    }
    Ok(())
}

/// Split a name into lowercase words at separators and case boundaries.
fn split_words(name: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() {
            // separator: '-', '_', '.', ' ', ...
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = match prev {
            Some(p) => {
                (p.is_lowercase() || p.is_ascii_digit()) && c.is_uppercase()
            }
            None => false,
        };
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kebab_input_projects_to_all_casings() {
        let names = Names::from_name("my-lib");
        assert_eq!(names.file_name, "my-lib");
        assert_eq!(names.class_name, "MyLib");
        assert_eq!(names.property_name, "myLib");
        assert_eq!(names.constant_name, "MY_LIB");
    }

    #[test]
    fn camel_input_projects_to_all_casings() {
        let names = Names::from_name("adminDashboard");
        assert_eq!(names.file_name, "admin-dashboard");
        assert_eq!(names.class_name, "AdminDashboard");
        assert_eq!(names.property_name, "adminDashboard");
    }

    #[test]
    fn snake_and_space_separators_are_equivalent() {
        assert_eq!(
            Names::from_name("my_lib").file_name,
            Names::from_name("my lib").file_name
        );
    }

    #[test]
    fn digits_stay_attached_to_their_word() {
        let names = Names::from_name("app2-ui");
        assert_eq!(names.file_name, "app2-ui");
        assert_eq!(names.class_name, "App2Ui");
    }

    #[test]
    fn projection_is_deterministic() {
        // Same input, same projections, every time.
        assert_eq!(Names::from_name("MyThing"), Names::from_name("MyThing"));
    }

    #[test]
    fn original_name_is_preserved() {
        assert_eq!(Names::from_name("WeirdName").name, "WeirdName");
    }

    #[test]
    fn validate_rejects_empty_and_leading_digit() {
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("1app").is_err());
        assert!(validate_project_name("-app").is_err());
    }

    #[test]
    fn validate_rejects_path_separators() {
        assert!(validate_project_name("apps/shop").is_err());
        assert!(validate_project_name("shop!").is_err());
    }

    #[test]
    fn validate_accepts_reasonable_names() {
        assert!(validate_project_name("shop").is_ok());
        assert!(validate_project_name("admin-dashboard").is_ok());
        assert!(validate_project_name("data_access2").is_ok());
    }
}
