//! The source catalog served by the configuration endpoint.
//!
//! The endpoint answers with `{ "listApi": { <name>: <descriptor>, ... } }`.
//! Key order in that object is meaningful (the first source is selected on
//! startup), so [`SourceCatalog`] keeps entries in the order they were
//! received instead of collecting them into a hash map.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Where a source's articles live and which type filters it offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceDescriptor {
    /// Feed URL.  A selected type is appended to it verbatim.
    pub all: String,
    /// Type filters, in display order.
    #[serde(default, rename = "listType")]
    pub list_type: Vec<String>,
}

impl SourceDescriptor {
    /// Build the feed URL for an optional type filter.
    ///
    /// The type is concatenated as-is; no separator or encoding is added.
    pub fn feed_url(&self, news_type: Option<&str>) -> String {
        match news_type {
            Some(t) => format!("{}{}", self.all, t),
            None => self.all.clone(),
        }
    }
}

/// Ordered mapping of source name to [`SourceDescriptor`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCatalog {
    entries: Vec<(String, SourceDescriptor)>,
}

impl SourceCatalog {
    pub fn new(entries: Vec<(String, SourceDescriptor)>) -> Self {
        let mut catalog = Self::default();
        for (name, descriptor) in entries {
            catalog.insert(name, descriptor);
        }
        catalog
    }

    // A repeated name keeps its original position and takes the newer value.
    fn insert(&mut self, name: String, descriptor: SourceDescriptor) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = descriptor,
            None => self.entries.push((name, descriptor)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SourceDescriptor> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    /// Source names in received order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.entries.first().map(|(n, _)| n.as_str())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for SourceCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = SourceCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of source name to source descriptor")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, SourceDescriptor>()? {
                    entries.push(entry);
                }
                Ok(SourceCatalog::new(entries))
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Body of the configuration endpoint.
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    #[serde(rename = "listApi")]
    pub list_api: SourceCatalog,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
