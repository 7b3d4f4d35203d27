//! crates/study_core/src/catalog.rs
//!
//! Category-keyed lookup tables for study materials, online classes,
//! internships and question papers. The tables are inert data shipped with the
//! crate and parsed once at startup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub title: String,
    pub url: String,
}

/// Which of the four lookup tables a page reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Materials,
    Classes,
    Internships,
    Papers,
}

type Table = BTreeMap<String, Vec<CatalogItem>>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    materials: Table,
    #[serde(default)]
    classes: Table,
    #[serde(default)]
    internships: Table,
    #[serde(default)]
    papers: Table,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The tables bundled with the application.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(BUILTIN_CATALOG)
    }

    fn table(&self, kind: CatalogKind) -> &Table {
        match kind {
            CatalogKind::Materials => &self.materials,
            CatalogKind::Classes => &self.classes,
            CatalogKind::Internships => &self.internships,
            CatalogKind::Papers => &self.papers,
        }
    }

    /// Items for `category`, or an empty slice when the key is unknown.
    /// Keys are matched case-insensitively and ignore surrounding whitespace.
    pub fn lookup(&self, kind: CatalogKind, category: &str) -> &[CatalogItem] {
        let key = category.trim().to_lowercase();
        self.table(kind)
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The recognised category keys for a table, sorted.
    pub fn categories(&self, kind: CatalogKind) -> Vec<&str> {
        self.table(kind).keys().map(String::as_str).collect()
    }
}
