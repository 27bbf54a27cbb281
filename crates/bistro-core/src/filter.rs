//! # Filter Engine
//!
//! Computes which menu cards are visible for the selected category and the
//! search box contents.
//!
//! ```text
//! catalog ──► category match ──AND── name search ──► visible items
//!                (exact, or                (case-insensitive
//!                 sentinel = all)           substring)
//! ```
//!
//! Filtering is a pure function of `(catalog, category, query)`. Catalog
//! order is preserved and an empty result is a normal outcome.

use std::sync::Arc;

use crate::types::MenuItem;

/// Category bar label that shows the whole menu.
pub const ALL_MENU: &str = "All Menu";

/// Labels treated as "no category filter".
pub(crate) const SENTINEL_LABELS: [&str; 2] = ["All", ALL_MENU];

// =============================================================================
// Category Filter
// =============================================================================

/// The category half of the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every item matches.
    #[default]
    All,
    /// Only items whose category equals this label exactly.
    Only(String),
}

impl CategoryFilter {
    /// Interprets a category bar label.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::filter::CategoryFilter;
    ///
    /// assert_eq!(CategoryFilter::from_label("All"), CategoryFilter::All);
    /// assert_eq!(CategoryFilter::from_label("All Menu"), CategoryFilter::All);
    /// assert_eq!(
    ///     CategoryFilter::from_label("Meals"),
    ///     CategoryFilter::Only("Meals".to_string())
    /// );
    /// ```
    pub fn from_label(label: &str) -> Self {
        if SENTINEL_LABELS.contains(&label) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }

    /// Checks a single item.
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }
}

// =============================================================================
// Search Query
// =============================================================================

/// The search half of the filter.
///
/// Surrounding whitespace is ignored, so a blank search box behaves like an
/// empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Normalizes raw search box text.
    pub fn new(text: &str) -> Self {
        SearchQuery {
            needle: text.trim().to_lowercase(),
        }
    }

    /// True when the query matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Checks a single item by name.
    pub fn matches(&self, item: &MenuItem) -> bool {
        self.is_empty() || item.name.to_lowercase().contains(&self.needle)
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// The current filter selection of a terminal screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub query: SearchQuery,
}

impl FilterState {
    /// Applies both halves of the filter to the given items.
    pub fn apply(&self, items: &[Arc<MenuItem>]) -> Vec<Arc<MenuItem>> {
        filter_items(items, &self.category, &self.query)
    }
}

/// Returns the items matching the category AND the query, in their original
/// order.
pub fn filter_items(
    items: &[Arc<MenuItem>],
    category: &CategoryFilter,
    query: &SearchQuery,
) -> Vec<Arc<MenuItem>> {
    items
        .iter()
        .filter(|item| category.matches(item) && query.matches(item))
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
