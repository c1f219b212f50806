use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;

const BUNDLED_CATALOG: &str = include_str!("../content/catalog.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Project,
    Publication,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Publication => "publication",
        }
    }
}

/// Title plus trusted, author-written HTML body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRecord {
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
struct RawRecord {
    id: String,
    title: String,
    body: String,
}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    projects: Vec<RawRecord>,
    #[serde(default)]
    publications: Vec<RawRecord>,
}

/// The two id -> record tables behind the detail dialogs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentCatalog {
    projects: HashMap<String, ContentRecord>,
    publications: HashMap<String, ContentRecord>,
}

impl ContentCatalog {
    /// Parses `{"projects": [...], "publications": [...]}`. Ids must be
    /// non-empty and unique within their table, and at least one record
    /// must be present.
    pub fn from_json(raw: &str) -> Result<Self, &'static str> {
        let value: Value = serde_json::from_str(raw).map_err(|_| "invalid_catalog_json")?;
        if !value.is_object() {
            return Err("invalid_catalog_json");
        }
        let document: CatalogDocument =
            serde_json::from_value(value).map_err(|_| "invalid_catalog_json")?;

        let catalog = Self {
            projects: index_records(document.projects)?,
            publications: index_records(document.publications)?,
        };
        if catalog.is_empty() {
            return Err("empty_catalog");
        }

        Ok(catalog)
    }

    pub fn bundled() -> Result<Self, &'static str> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn lookup(&self, kind: ContentKind, id: &str) -> Option<&ContentRecord> {
        self.table(kind).get(id)
    }

    pub fn records(&self, kind: ContentKind) -> impl Iterator<Item = (&str, &ContentRecord)> {
        self.table(kind)
            .iter()
            .map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self, kind: ContentKind) -> usize {
        self.table(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.publications.is_empty()
    }

    fn table(&self, kind: ContentKind) -> &HashMap<String, ContentRecord> {
        match kind {
            ContentKind::Project => &self.projects,
            ContentKind::Publication => &self.publications,
        }
    }
}

fn index_records(records: Vec<RawRecord>) -> Result<HashMap<String, ContentRecord>, &'static str> {
    let mut seen = HashSet::new();
    let mut table = HashMap::with_capacity(records.len());

    for record in records {
        let id = record.id.trim().to_string();
        if id.is_empty() || record.title.trim().is_empty() {
            return Err("empty_content_field");
        }
        if !seen.insert(id.clone()) {
            return Err("duplicate_content_id");
        }

        table.insert(
            id,
            ContentRecord {
                title: record.title,
                body: record.body,
            },
        );
    }

    Ok(table)
}
