//! Work Entity

use kernel::id::{UserId, WorkId};
use kernel::validation::ValidationErrors;

/// Inclusive bounds on the name length, in characters
pub const NAME_MIN_CHARS: usize = 5;
pub const NAME_MAX_CHARS: usize = 100;

/// Text columns cannot hold NUL
pub(crate) fn contains_nul(text: &str) -> bool {
    text.contains('\0')
}

/// Work entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    pub id: WorkId,
    /// Owner; only this user may delete the work
    pub creator_id: UserId,
    pub name: String,
    pub description: Option<String>,
    /// Ordered as submitted
    pub document_links: Vec<String>,
}

/// Work creation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDraft {
    pub creator: UserId,
    pub name: String,
    pub description: Option<String>,
    pub document_links: Vec<String>,
}

impl WorkDraft {
    /// Builds a draft; an empty description counts as absent.
    pub fn new(
        creator: UserId,
        name: impl Into<String>,
        description: Option<String>,
        document_links: Vec<String>,
    ) -> Self {
        Self {
            creator,
            name: name.into(),
            description: description.filter(|d| !d.is_empty()),
            document_links,
        }
    }

    /// Pure structural validation, run before anything is persisted
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(self.creator.is_positive(), "creator", "cannot be blank");

        let name_chars = self.name.chars().count();
        if name_chars == 0 {
            errors.add("name", "cannot be blank");
        } else {
            errors.check(
                (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_chars),
                "name",
                "the length must be between 5 and 100",
            );
        }
        errors.check(!contains_nul(&self.name), "name", "must not contain NUL characters");

        if self.description.as_deref().is_some_and(contains_nul) {
            errors.add("description", "must not contain NUL characters");
        }

        errors.check(
            !self.document_links.iter().any(|link| contains_nul(link)),
            "links",
            "must not contain NUL characters",
        );

        errors.into_result()
    }

    /// Attach the store-assigned id
    pub fn into_work(self, id: WorkId) -> Work {
        Work {
            id,
            creator_id: self.creator,
            name: self.name,
            description: self.description,
            document_links: self.document_links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(creator: i64, name: &str) -> WorkDraft {
        WorkDraft::new(UserId::new(creator), name, None, vec![])
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(draft(1, "abcd").validate().is_err());
        assert!(draft(1, "abcde").validate().is_ok());
        assert!(draft(1, &"x".repeat(100)).validate().is_ok());
        assert!(draft(1, &"x".repeat(101)).validate().is_err());
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        // 5 characters, 15 bytes
        assert!(draft(1, "作品の名前").validate().is_ok());
    }

    #[test]
    fn test_creator_must_be_positive() {
        let err = draft(0, "valid name").validate().unwrap_err();
        assert!(err.has("creator"));
        assert!(!err.has("name"));

        assert!(draft(-3, "valid name").validate().unwrap_err().has("creator"));
    }

    #[test]
    fn test_all_violations_reported() {
        let err = draft(0, "").validate().unwrap_err();
        assert_eq!(err.to_string(), "creator: cannot be blank; name: cannot be blank");
    }

    #[test]
    fn test_nul_characters_rejected() {
        let err = draft(1, "abc\0def").validate().unwrap_err();
        assert_eq!(err.to_string(), "name: must not contain NUL characters");

        let d = WorkDraft::new(UserId::new(1), "valid name", Some("a\0b".into()), vec![]);
        assert!(d.validate().unwrap_err().has("description"));

        let d = WorkDraft::new(
            UserId::new(1),
            "valid name",
            None,
            vec!["https://a.example".into(), "https://b\0.example".into()],
        );
        let err = d.validate().unwrap_err();
        assert!(err.has("links"));
        assert!(!err.has("name"));
    }

    #[test]
    fn test_other_control_characters_allowed_in_text() {
        let d = WorkDraft::new(
            UserId::new(1),
            "line one\nline two",
            Some("tab\there".into()),
            vec![],
        );
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_empty_description_is_absent() {
        let d = WorkDraft::new(UserId::new(1), "valid name", Some(String::new()), vec![]);
        assert_eq!(d.description, None);
    }
}
