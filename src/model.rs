//! Data model shared by the crawl, extract and normalize stages

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// The URL the page was requested from
    pub url: String,

    /// Raw HTML body
    pub content: String,
}

impl Page {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Ordered title -> description mapping
///
/// Keeps first-insertion order. Inserting an existing title replaces its
/// description in place. Lookups go through a title index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submodules {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Submodules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the description for `title`
    pub fn insert(&mut self, title: impl Into<String>, description: impl Into<String>) {
        let title = title.into();
        let description = description.into();
        match self.index.get(&title) {
            Some(&position) => self.entries[position].1 = description,
            None => {
                self.index.insert(title.clone(), self.entries.len());
                self.entries.push((title, description));
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.index
            .get(title)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, d)| (t.as_str(), d.as_str()))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }
}

impl FromIterator<(String, String)> for Submodules {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut submodules = Submodules::new();
        for (title, description) in iter {
            submodules.insert(title, description);
        }
        submodules
    }
}

impl Serialize for Submodules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, description) in &self.entries {
            map.serialize_entry(title, description)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Submodules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SubmodulesVisitor;

        impl<'de> Visitor<'de> for SubmodulesVisitor {
            type Value = Submodules;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of submodule titles to descriptions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut submodules = Submodules::new();
                while let Some((title, description)) = access.next_entry::<String, String>()? {
                    submodules.insert(title, description);
                }
                Ok(submodules)
            }
        }

        deserializer.deserialize_map(SubmodulesVisitor)
    }
}

/// One page's extraction result, before normalization
///
/// Submodule titles may collide with titles that only differ after
/// normalization.
#[derive(Debug, Clone, Default)]
pub struct RawModule {
    pub module: String,
    pub description: String,
    pub submodules: Submodules,

    /// URL of the page this record was extracted from
    pub source_url: String,

    /// Main title of the source page
    pub page_title: String,

    /// Whitespace-collapsed visible text of the source page
    pub page_text: String,
}

/// A deduplicated module record, as serialized to the output document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanModule {
    pub module: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Submodule")]
    pub submodules: Submodules,
}

impl From<&CleanModule> for RawModule {
    fn from(clean: &CleanModule) -> Self {
        RawModule {
            module: clean.module.clone(),
            description: clean.description.clone(),
            submodules: clean.submodules.clone(),
            ..Default::default()
        }
    }
}
