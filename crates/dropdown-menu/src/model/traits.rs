//! Data source contract between the menu and a list renderer.
//!
//! A renderer asks a [`ListDataProvider`] how many sections and rows to draw,
//! what each row shows, and reports taps back through
//! [`did_select_row`](ListDataProvider::did_select_row).

use std::fmt;

/// Sections of the menu list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSection {
    /// The search field row; empty unless search is enabled.
    Search,
    /// The filtered items.
    Items,
}

impl ListSection {
    /// Number of sections in the menu list.
    pub const COUNT: usize = 2;

    /// Map a section index to a section.
    pub fn from_index(section: usize) -> Option<Self> {
        match section {
            0 => Some(Self::Search),
            1 => Some(Self::Items),
            _ => None,
        }
    }

    /// The index of this section.
    pub fn index(self) -> usize {
        match self {
            Self::Search => 0,
            Self::Items => 1,
        }
    }
}

/// What a single row displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent {
    /// The search field, showing the current query.
    SearchField {
        /// Current query text.
        query: String,
    },
    /// A selectable item.
    Item {
        /// Item text.
        text: String,
    },
}

impl RowContent {
    /// Display text for the row.
    pub fn text(&self) -> &str {
        match self {
            RowContent::SearchField { query } => query,
            RowContent::Item { text } => text,
        }
    }

    /// Whether tapping the row selects an item.
    pub fn is_selectable(&self) -> bool {
        matches!(self, RowContent::Item { .. })
    }
}

impl fmt::Display for RowContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Sectioned list data consumed by a renderer.
///
/// Out-of-range sections and rows are reported as empty / `None` rather than
/// as errors.
pub trait ListDataProvider {
    /// Number of sections.
    fn section_count(&self) -> usize {
        ListSection::COUNT
    }

    /// Number of rows in `section`.
    fn row_count(&self, section: usize) -> usize;

    /// Content of the row at (`section`, `row`).
    fn row(&self, section: usize, row: usize) -> Option<RowContent>;

    /// Height of every row.
    fn row_height(&self) -> f32;

    /// Handle a tap on (`section`, `row`).
    ///
    /// Returns `true` if the tap selected an item.
    fn did_select_row(&mut self, section: usize, row: usize) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<String>);

    impl ListDataProvider for Fixed {
        fn row_count(&self, section: usize) -> usize {
            match ListSection::from_index(section) {
                Some(ListSection::Items) => self.0.len(),
                _ => 0,
            }
        }

        fn row(&self, section: usize, row: usize) -> Option<RowContent> {
            match ListSection::from_index(section)? {
                ListSection::Items => self.0.get(row).map(|text| RowContent::Item { text: text.clone() }),
                ListSection::Search => None,
            }
        }

        fn row_height(&self) -> f32 {
            44.0
        }

        fn did_select_row(&mut self, section: usize, row: usize) -> bool {
            self.row(section, row).is_some_and(|content| content.is_selectable())
        }
    }

    #[test]
    fn test_section_indices() {
        assert_eq!(ListSection::from_index(0), Some(ListSection::Search));
        assert_eq!(ListSection::from_index(1), Some(ListSection::Items));
        assert_eq!(ListSection::from_index(2), None);
        assert_eq!(ListSection::Items.index(), 1);
    }

    #[test]
    fn test_default_section_count() {
        let provider = Fixed(vec!["a".into()]);
        assert_eq!(provider.section_count(), 2);
        assert_eq!(provider.row_count(0), 0);
        assert_eq!(provider.row_count(1), 1);
        assert_eq!(provider.row_count(7), 0);
    }

    #[test]
    fn test_out_of_range_rows() {
        let mut provider = Fixed(vec!["a".into()]);
        assert_eq!(provider.row(1, 0).map(|r| r.to_string()), Some("a".to_string()));
        assert_eq!(provider.row(1, 1), None);
        assert!(!provider.did_select_row(1, 5));
        assert!(provider.did_select_row(1, 0));
    }

    #[test]
    fn test_row_content() {
        let search = RowContent::SearchField { query: "pa".into() };
        assert_eq!(search.text(), "pa");
        assert!(!search.is_selectable());
        assert!(RowContent::Item { text: "x".into() }.is_selectable());
    }
}
