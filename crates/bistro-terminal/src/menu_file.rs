//! # Menu File Provider
//!
//! A [`CatalogProvider`] that reads the menu from a TOML file.
//!
//! ## File Format
//! ```toml
//! # optional, category bar order; listed categories show even when empty
//! categories = ["Meals", "Soups", "Beverages"]
//!
//! [[items]]
//! id = "1"
//! name = "Deep Fried Wonton"
//! price_cents = 1500
//! category = "Appetizer"
//! image = "/img/wonton.png"   # optional
//! ```
//!
//! The file is read once in [`FileCatalog::open`]; `load` hands out the
//! parsed items and never touches the disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use bistro_core::{CatalogProvider, CoreResult, MenuItem, Money};

use crate::error::TerminalResult;

#[derive(Debug, Deserialize)]
struct MenuFile {
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    items: Vec<MenuEntry>,
}

#[derive(Debug, Deserialize)]
struct MenuEntry {
    id: String,
    name: String,
    price_cents: i64,
    category: String,
    #[serde(default)]
    image: String,
}

impl From<MenuEntry> for MenuItem {
    fn from(entry: MenuEntry) -> Self {
        MenuItem::new(
            entry.id,
            entry.name,
            Money::from_cents(entry.price_cents),
            entry.category,
            entry.image,
        )
    }
}

/// Menu items read from a TOML file.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    items: Vec<MenuItem>,
    categories: Vec<String>,
}

impl FileCatalog {
    /// Reads and parses a menu file.
    ///
    /// Item validation (ids, prices, duplicates) happens later, when the
    /// items are turned into a `Catalog`.
    pub fn open(path: impl AsRef<Path>) -> TerminalResult<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path)?;
        let file: MenuFile = toml::from_str(&contents)?;
        let items: Vec<MenuItem> = file.items.into_iter().map(MenuItem::from).collect();

        info!(
            ?path,
            items = items.len(),
            categories = file.categories.len(),
            "Menu file loaded"
        );
        Ok(FileCatalog {
            path,
            items,
            categories: file.categories,
        })
    }

    /// The file this menu came from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for FileCatalog {
    fn load(&self) -> CoreResult<Vec<MenuItem>> {
        Ok(self.items.clone())
    }

    fn categories(&self) -> CoreResult<Vec<String>> {
        Ok(self.categories.clone())
    }
}
