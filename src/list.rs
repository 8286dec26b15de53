//! Ordered collections of parsed records.

use serde_json::Value;

use crate::envelope::Pagination;
use crate::error::{Error, Result};
use crate::json::{self, FromJson};

/// An ordered, restartable sequence of parsed records, with the v1
/// pagination block when the source endpoint carries one.
///
/// Parsing is atomic: a single malformed element fails the whole list, and
/// the error names the element's index. Silently dropping entries could
/// hide funds or transactions from the caller.
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    items: Vec<T>,
    pagination: Option<Pagination>,
}

impl<T> PagedList<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// The first record, when any; callers use this to pick up a wallet's
    /// default account.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }
}

impl<T: FromJson> PagedList<T> {
    pub(crate) fn from_json(
        path: &str,
        value: &Value,
        pagination: Option<Pagination>,
    ) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| Error::invalid_field(path, "array", json::type_name(value)))?;

        let mut items = Vec::with_capacity(array.len());
        for (i, element) in array.iter().enumerate() {
            items.push(T::from_json(&json::index(path, i), element)?);
        }

        Ok(Self { items, pagination })
    }
}

impl<'a, T> IntoIterator for &'a PagedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    impl FromJson for u64 {
        fn from_json(path: &str, value: &Value) -> Result<Self> {
            value
                .as_u64()
                .ok_or_else(|| Error::invalid_field(path, "integer", json::type_name(value)))
        }
    }

    #[test]
    fn test_preserves_order_and_restarts() {
        let list: PagedList<u64> =
            PagedList::from_json("numbers", &json!([3, 1, 2]), None).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.first(), Some(&3));
        let once: Vec<_> = list.iter().copied().collect();
        let twice: Vec<_> = list.iter().copied().collect();
        assert_eq!(once, vec![3, 1, 2]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fails_atomically_with_index() {
        let err = PagedList::<u64>::from_json("numbers", &json!([1, "x", 3]), None).unwrap_err();
        assert!(err.to_string().contains("numbers[1]"));
    }

    #[test]
    fn test_rejects_non_array() {
        let err = PagedList::<u64>::from_json("numbers", &json!({"a": 1}), None).unwrap_err();
        assert!(err.to_string().contains("expected array"));
    }
}
