//! Pagination Window
//!
//! `(page_size, page_index)` pairs selecting an ordered slice of a collection.

use crate::validation::ValidationErrors;

/// Validated pagination window
///
/// Construction fails fast on a non-positive size, a negative index, or an
/// offset that does not fit in `i64`, so no query ever runs with a negative
/// or overflowing offset.
///
/// ## Examples
/// ```rust
/// use kernel::pagination::PageRequest;
///
/// let page = PageRequest::new(5, 1).unwrap();
/// assert_eq!(page.limit(), 5);
/// assert_eq!(page.offset(), 5);
///
/// assert!(PageRequest::new(0, 0).is_err());
/// assert!(PageRequest::new(5, -1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    size: i64,
    index: i64,
    offset: i64,
}

impl PageRequest {
    pub fn new(size: i64, index: i64) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(size > 0, "pagination", "must be greater than 0");
        errors.check(index >= 0, "page", "must be 0 or greater");
        errors.into_result()?;

        let offset = size
            .checked_mul(index)
            .ok_or_else(|| ValidationErrors::single("page", "is out of range"))?;

        Ok(Self {
            size,
            index,
            offset,
        })
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    /// Maximum number of rows (SQL `LIMIT`)
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Number of rows to skip (SQL `OFFSET`)
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Apply the window to an already-ordered iterator
    pub fn window<I: Iterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.size).unwrap_or(usize::MAX);
        items.skip(skip).take(take)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        let page = PageRequest::new(10, 3).unwrap();
        assert_eq!(page.offset(), 30);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.index(), 3);
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let err = PageRequest::new(0, 0).unwrap_err();
        assert!(err.has("pagination"));

        let err = PageRequest::new(-5, 0).unwrap_err();
        assert!(err.has("pagination"));
    }

    #[test]
    fn test_rejects_negative_index() {
        let err = PageRequest::new(5, -1).unwrap_err();
        assert!(err.has("page"));
        assert!(!err.has("pagination"));
    }

    #[test]
    fn test_rejects_both() {
        let err = PageRequest::new(0, -1).unwrap_err();
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_rejects_overflowing_offset() {
        let err = PageRequest::new(i64::MAX, 2).unwrap_err();
        assert!(err.has("page"));
    }

    #[test]
    fn test_window() {
        let page = PageRequest::new(3, 1).unwrap();
        let slice: Vec<i32> = page.window(1..=10).collect();
        assert_eq!(slice, vec![4, 5, 6]);

        let past_end = PageRequest::new(3, 5).unwrap();
        assert_eq!(past_end.window(1..=10).count(), 0);
    }
}
