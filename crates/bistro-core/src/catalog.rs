//! # Catalog Store
//!
//! The read-only menu for a terminal session.
//!
//! ## Loading Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CatalogProvider::load()  ──►  Vec<MenuItem>                            │
//! │        (static list,                 │                                  │
//! │         menu file, ...)              ▼                                  │
//! │                              Catalog::new()                             │
//! │                              ├── validate each item                     │
//! │                              ├── reject duplicate ids                   │
//! │                              ├── check the provider's category labels   │
//! │                              └── wrap items in Arc, index by id         │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                     get_all() / get_by_id() / categories()              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::filter::{ALL_MENU, SENTINEL_LABELS};
use crate::money::Money;
use crate::types::MenuItem;
use crate::validation::{validate_category, validate_menu_item};

// =============================================================================
// Catalog Provider
// =============================================================================

/// Source of the menu items for a session.
///
/// The cart and the totals calculator only ever see the resulting
/// [`Catalog`], so a provider can be swapped without touching them.
pub trait CatalogProvider {
    /// Returns every menu item in display order.
    fn load(&self) -> CoreResult<Vec<MenuItem>>;

    /// Category bar labels in display order, without the "All Menu"
    /// sentinel. A listed category shows up even when no item is in it.
    fn categories(&self) -> CoreResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// A provider backed by an in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<MenuItem>,
    categories: Vec<String>,
}

impl StaticCatalog {
    /// Wraps an explicit item list.
    pub fn new(items: Vec<MenuItem>) -> Self {
        StaticCatalog {
            items,
            categories: Vec::new(),
        }
    }

    /// Sets the category bar labels.
    pub fn with_categories<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = labels.into_iter().map(Into::into).collect();
        self
    }

    /// The house menu the counter ships with.
    pub fn house_menu() -> Self {
        const IMAGE: &str = "/placeholder.svg?height=100&width=100";

        StaticCatalog::new(vec![
            MenuItem::new("1", "Deep Fried Wonton", Money::from_cents(1500), "Appetizer", IMAGE),
            MenuItem::new("2", "Stir-Fried Noodles", Money::from_cents(2100), "Meals", IMAGE),
            MenuItem::new("3", "Spicy Chicken Tendon", Money::from_cents(3100), "Meals", IMAGE),
            MenuItem::new("4", "Fried Rice with Pork", Money::from_cents(4000), "Meals", IMAGE),
            MenuItem::new("5", "Sausages", Money::from_cents(1500), "Side Dish", IMAGE),
            MenuItem::new("6", "Lambreta Burger", Money::from_cents(3000), "Meals", IMAGE),
        ])
        .with_categories(["Meals", "Soups", "Beverages", "Appetizer", "Side Dish"])
    }
}

impl CatalogProvider for StaticCatalog {
    fn load(&self) -> CoreResult<Vec<MenuItem>> {
        Ok(self.items.clone())
    }

    fn categories(&self) -> CoreResult<Vec<String>> {
        Ok(self.categories.clone())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The loaded, validated menu.
///
/// ## Invariants
/// - Item ids are unique
/// - Order is the provider's loading order and never changes
/// - Items are never mutated after load
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Arc<MenuItem>>,
    index: HashMap<String, usize>,
    labels: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from raw items.
    ///
    /// ## Errors
    /// - `CoreError::Validation` when an item is malformed or an id repeats
    pub fn new(items: Vec<MenuItem>) -> CoreResult<Self> {
        let mut index = HashMap::with_capacity(items.len());
        let mut stored = Vec::with_capacity(items.len());

        for item in items {
            validate_menu_item(&item)?;

            if index.contains_key(&item.id) {
                return Err(ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: item.id,
                }
                .into());
            }

            index.insert(item.id.clone(), stored.len());
            stored.push(Arc::new(item));
        }

        Ok(Catalog {
            items: stored,
            index,
            labels: Vec::new(),
        })
    }

    /// Builds a catalog with a fixed category bar.
    ///
    /// ## Errors
    /// - `Required` for a blank label
    /// - `InvalidFormat` for "All" or "All Menu", which mean every category
    /// - `Duplicate` for a label listed twice
    pub fn with_categories(items: Vec<MenuItem>, labels: Vec<String>) -> CoreResult<Self> {
        let mut catalog = Catalog::new(items)?;

        for label in &labels {
            validate_category(label)?;
            if SENTINEL_LABELS.contains(&label.as_str()) {
                return Err(ValidationError::InvalidFormat {
                    field: "category".to_string(),
                    reason: format!("'{}' is reserved for the whole menu", label),
                }
                .into());
            }
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(ValidationError::Duplicate {
                    field: "category".to_string(),
                    value: label.clone(),
                }
                .into());
            }
        }

        catalog.labels = labels;
        Ok(catalog)
    }

    /// Loads and validates the items and category labels of a provider.
    pub fn from_provider(provider: &dyn CatalogProvider) -> CoreResult<Self> {
        Catalog::with_categories(provider.load()?, provider.categories()?)
    }

    /// Returns the full menu in loading order. May be empty.
    pub fn get_all(&self) -> &[Arc<MenuItem>] {
        &self.items
    }

    /// Resolves an item id.
    ///
    /// ## Errors
    /// - `CoreError::ItemNotFound` when the id is not on the menu
    pub fn get_by_id(&self, id: &str) -> CoreResult<Arc<MenuItem>> {
        self.index
            .get(id)
            .map(|&i| Arc::clone(&self.items[i]))
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))
    }

    /// Labels for the category bar: the "All Menu" sentinel, the provider's
    /// labels, then any other item category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut labels = vec![ALL_MENU.to_string()];
        labels.extend(self.labels.iter().cloned());
        for item in &self.items {
            if !labels.iter().any(|c| c == &item.category) {
                labels.push(item.category.clone());
            }
        }
        labels
    }

    /// Number of items on the menu.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items are configured.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> Catalog {
        Catalog::from_provider(&StaticCatalog::house_menu()).unwrap()
    }

    #[test]
    fn test_get_all_preserves_loading_order() {
        let catalog = house();
        let names: Vec<&str> = catalog.get_all().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Deep Fried Wonton",
                "Stir-Fried Noodles",
                "Spicy Chicken Tendon",
                "Fried Rice with Pork",
                "Sausages",
                "Lambreta Burger",
            ]
        );
    }

    #[test]
    fn test_get_by_id() {
        let catalog = house();
        let item = catalog.get_by_id("5").unwrap();
        assert_eq!(item.name, "Sausages");
        assert_eq!(item.unit_price.cents(), 1500);
    }

    #[test]
    fn test_get_by_id_shares_the_catalog_record() {
        let catalog = house();
        let a = catalog.get_by_id("1").unwrap();
        let b = catalog.get_by_id("1").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_get_by_id_not_found() {
        let catalog = house();
        assert_eq!(
            catalog.get_by_id("99").unwrap_err(),
            CoreError::ItemNotFound("99".to_string())
        );
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::from_provider(&StaticCatalog::default()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.get_all().is_empty());
        assert_eq!(catalog.categories(), vec![ALL_MENU.to_string()]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![
            MenuItem::new("1", "Wonton", Money::from_cents(1500), "Appetizer", ""),
            MenuItem::new("1", "Noodles", Money::from_cents(2100), "Meals", ""),
        ];
        let err = Catalog::new(items).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let items = vec![MenuItem::new("1", "Wonton", Money::from_cents(-1), "Appetizer", "")];
        assert!(Catalog::new(items).is_err());
    }

    #[test]
    fn test_oversized_price_rejected() {
        let items = vec![MenuItem::new(
            "gold",
            "Gold Leaf Platter",
            Money::from_cents(i64::MAX / 2 + 1),
            "Meals",
            "",
        )];
        assert!(matches!(
            Catalog::new(items),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_house_categories_include_empty_ones() {
        let catalog = house();
        assert_eq!(
            catalog.categories(),
            vec!["All Menu", "Meals", "Soups", "Beverages", "Appetizer", "Side Dish"]
        );
    }

    #[test]
    fn test_unlisted_categories_follow_listed_ones() {
        let provider = StaticCatalog::new(vec![
            MenuItem::new("1", "Wonton", Money::from_cents(1500), "Appetizer", ""),
            MenuItem::new("2", "Tea", Money::from_cents(300), "Beverages", ""),
            MenuItem::new("3", "Noodles", Money::from_cents(2100), "Meals", ""),
        ])
        .with_categories(["Meals", "Soups"]);

        let catalog = Catalog::from_provider(&provider).unwrap();
        assert_eq!(
            catalog.categories(),
            vec!["All Menu", "Meals", "Soups", "Appetizer", "Beverages"]
        );
    }

    #[test]
    fn test_categories_without_labels_in_first_seen_order() {
        let items = StaticCatalog::house_menu().load().unwrap();
        let catalog = Catalog::new(items).unwrap();
        assert_eq!(
            catalog.categories(),
            vec!["All Menu", "Appetizer", "Meals", "Side Dish"]
        );
    }

    #[test]
    fn test_bad_category_labels_rejected() {
        let bad = [vec!["Meals", "Meals"], vec!["All"], vec!["  "]];
        for labels in bad {
            let labels: Vec<String> = labels.into_iter().map(String::from).collect();
            assert!(
                Catalog::with_categories(Vec::new(), labels.clone()).is_err(),
                "{:?} should be rejected",
                labels
            );
        }
    }
}
