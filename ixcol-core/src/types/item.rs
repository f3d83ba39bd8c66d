//! Tagged row views.

use super::TypeCode;
use std::fmt;

/// A borrowed view of one row, tagged with the kind of column it came from.
///
/// The view borrows the column, so it cannot outlive it or survive a
/// mutation of it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemView<'a> {
    type_code: TypeCode,
    data: &'a [u8],
}

impl<'a> ItemView<'a> {
    /// Create a new item view.
    #[must_use]
    pub const fn new(type_code: TypeCode, data: &'a [u8]) -> Self {
        Self { type_code, data }
    }

    /// Get the type code of the originating column.
    #[must_use]
    pub const fn type_code(&self) -> TypeCode {
        self.type_code
    }

    /// Get the raw bytes of the row.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Get the row as UTF-8 text, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.data).ok()
    }

    /// Length of the row in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the row is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for ItemView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemView")
            .field("type", &self.type_code)
            .field("data", &String::from_utf8_lossy(self.data))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_view_text() {
        let item = ItemView::new(TypeCode::IxJson, br#"{"a":1}"#);
        assert_eq!(item.type_code(), TypeCode::IxJson);
        assert_eq!(item.as_str(), Some(r#"{"a":1}"#));
        assert_eq!(item.len(), 7);
        assert!(!item.is_empty());
    }

    #[test]
    fn item_view_invalid_utf8() {
        let item = ItemView::new(TypeCode::IxJson, &[0xff, 0xfe]);
        assert_eq!(item.as_str(), None);
        assert_eq!(item.as_bytes(), &[0xff, 0xfe]);
    }
}
