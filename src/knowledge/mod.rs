//! Best-practice document index
//!
//! Holds best-practice articles and module-structure documents, each
//! addressable by URI:
//!
//! - `bestpractice:<category>/<id>`
//! - `modulestructure:<provider|generic>/<type>`
//!
//! Like the pattern repository, the map sits behind an `RwLock` and readers
//! get clones.

mod defaults;

pub use defaults::DEFAULT_AUTHORITY_SOURCES;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

pub const BEST_PRACTICE_SCHEME: &str = "bestpractice";
pub const MODULE_STRUCTURE_SCHEME: &str = "modulestructure";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestPracticeDoc {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl BestPracticeDoc {
    pub fn uri(&self) -> String {
        format!("{}:{}/{}", BEST_PRACTICE_SCHEME, self.category, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStructureFile {
    pub name: String,
    pub description: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStructureDoc {
    #[serde(rename = "type")]
    pub structure_type: String,
    pub description: String,
    pub files: Vec<ModuleStructureFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl ModuleStructureDoc {
    pub fn uri(&self) -> String {
        format!(
            "{}:{}/{}",
            MODULE_STRUCTURE_SCHEME,
            self.provider.as_deref().unwrap_or("generic"),
            self.structure_type
        )
    }
}

/// One indexed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    BestPractice(BestPracticeDoc),
    ModuleStructure(ModuleStructureDoc),
}

impl Document {
    pub fn uri(&self) -> String {
        match self {
            Document::BestPractice(doc) => doc.uri(),
            Document::ModuleStructure(doc) => doc.uri(),
        }
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            Document::BestPractice(doc) => serde_json::to_value(doc)?,
            Document::ModuleStructure(doc) => serde_json::to_value(doc)?,
        })
    }
}

/// Criteria for [`DocumentIndex::best_practices`]; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PracticeQuery {
    /// Case-insensitive substring of title or description
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    /// Any keyword found in title, description, content or a tag
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl PracticeQuery {
    pub fn matches(&self, doc: &BestPracticeDoc) -> bool {
        let title = doc.title.to_lowercase();
        let description = doc.description.to_lowercase();

        if let Some(topic) = non_empty(&self.topic) {
            let topic = topic.to_lowercase();
            if !title.contains(&topic) && !description.contains(&topic) {
                return false;
            }
        }
        if non_empty(&self.category).is_some_and(|c| c != doc.category) {
            return false;
        }
        if non_empty(&self.provider).is_some_and(|p| Some(p) != doc.provider.as_deref()) {
            return false;
        }
        if !self.keywords.is_empty() {
            let content = doc.content.to_lowercase();
            let tags: Vec<String> = doc.tags.iter().map(|t| t.to_lowercase()).collect();
            let hit = self.keywords.iter().any(|kw| {
                let kw = kw.to_lowercase();
                title.contains(&kw)
                    || description.contains(&kw)
                    || content.contains(&kw)
                    || tags.iter().any(|t| t.contains(&kw))
            });
            if !hit {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

pub struct DocumentIndex {
    documents: RwLock<BTreeMap<String, Document>>,
    authority_sources: Vec<String>,
}

impl DocumentIndex {
    pub fn new(authority_sources: Vec<String>) -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
            authority_sources,
        }
    }

    /// Index seeded with the built-in documents
    pub fn with_defaults(authority_sources: Vec<String>) -> Self {
        let index = Self::new(authority_sources);
        index.replace_all(defaults::default_documents());
        index
    }

    /// Sources documentation is refreshed from
    pub fn authority_sources(&self) -> &[String] {
        &self.authority_sources
    }

    pub fn insert(&self, document: Document) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(document.uri(), document);
    }

    pub fn replace_all(&self, documents: impl IntoIterator<Item = Document>) {
        let fresh: BTreeMap<String, Document> =
            documents.into_iter().map(|d| (d.uri(), d)).collect();
        debug!("Indexed {} documents", fresh.len());
        *self.documents.write().unwrap_or_else(PoisonError::into_inner) = fresh;
    }

    /// URIs starting with `prefix`, sorted
    pub fn list_resources(&self, prefix: &str) -> Vec<String> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|uri| uri.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn get_resource(&self, uri: &str) -> Result<Value> {
        let guard = self.documents.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .get(uri)
            .ok_or_else(|| Error::ResourceNotFound(uri.to_string()))?
            .to_json()
    }

    pub fn best_practices(&self, query: &PracticeQuery) -> Vec<BestPracticeDoc> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter_map(|doc| match doc {
                Document::BestPractice(bp) if query.matches(bp) => Some(bp.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn module_structures(
        &self,
        structure_type: Option<&str>,
        provider: Option<&str>,
    ) -> Vec<ModuleStructureDoc> {
        let structure_type = structure_type.filter(|s| !s.is_empty());
        let provider = provider.filter(|s| !s.is_empty());
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter_map(|doc| match doc {
                Document::ModuleStructure(ms) => Some(ms),
                _ => None,
            })
            .filter(|ms| structure_type.map_or(true, |t| ms.structure_type == t))
            .filter(|ms| provider.map_or(true, |p| ms.provider.as_deref() == Some(p)))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.documents.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DocumentIndex {
    fn default() -> Self {
        Self::with_defaults(
            DEFAULT_AUTHORITY_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uris() {
        let index = DocumentIndex::default();
        assert_eq!(index.len(), 7);
        assert_eq!(
            index.list_resources("modulestructure:"),
            vec!["modulestructure:aws/aws", "modulestructure:generic/basic"]
        );
        assert!(index
            .list_resources("bestpractice:")
            .contains(&"bestpractice:security/security-group-rules".to_string()));
        assert_eq!(index.authority_sources().len(), 4);
    }

    #[test]
    fn test_get_resource() {
        let index = DocumentIndex::default();
        let value = index
            .get_resource("bestpractice:stability/version-pinning")
            .unwrap();
        assert_eq!(value["id"], "version-pinning");

        let err = index.get_resource("bestpractice:x/y").unwrap_err();
        assert_eq!(err.to_string(), "resource not found: bestpractice:x/y");
    }

    #[test]
    fn test_topic_filter() {
        let index = DocumentIndex::default();
        let found = index.best_practices(&PracticeQuery {
            topic: Some("TAGGING".into()),
            ..Default::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "consistent-tagging");
    }

    #[test]
    fn test_category_and_provider_exact() {
        let index = DocumentIndex::default();
        let aws = index.best_practices(&PracticeQuery {
            provider: Some("aws".into()),
            ..Default::default()
        });
        assert_eq!(aws.len(), 1);
        assert_eq!(aws[0].id, "security-group-rules");

        let none = index.best_practices(&PracticeQuery {
            category: Some("Security".into()),
            ..Default::default()
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_keywords_any() {
        let index = DocumentIndex::default();
        let found = index.best_practices(&PracticeQuery {
            keywords: vec!["zzz".into(), "versioning".into()],
            ..Default::default()
        });
        assert!(found.iter().any(|d| d.id == "version-pinning"));
        let all = index.best_practices(&PracticeQuery::default());
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_module_structures() {
        let index = DocumentIndex::default();
        assert_eq!(index.module_structures(None, None).len(), 2);
        let aws = index.module_structures(None, Some("aws"));
        assert_eq!(aws.len(), 1);
        assert_eq!(aws[0].structure_type, "aws");
        let basic = index.module_structures(Some("basic"), None);
        assert_eq!(basic.len(), 1);
        assert!(basic[0].provider.is_none());
        assert!(index.module_structures(Some("basic"), Some("aws")).is_empty());
    }
}
