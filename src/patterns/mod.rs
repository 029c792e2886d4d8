//! Pattern repository
//!
//! Indexed store of named Terraform templates. Lookups are by id or by a
//! multi-criteria [`PatternFilter`]. The map sits behind an `RwLock` so a
//! refresh can swap the corpus while readers keep querying; readers always
//! receive clones.

mod defaults;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternCategory {
    Compute,
    Networking,
    Storage,
    Database,
    Security,
    Application,
    Monitoring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Basic,
    Intermediate,
    Advanced,
}

macro_rules! lowercase_names {
    ($ty:ty, $($name:literal => $variant:path),+ $(,)?) => {
        impl std::str::FromStr for $ty {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(anyhow::anyhow!(
                        "Unknown value '{}'. Valid values: {}",
                        s,
                        [$($name),+].join(", ")
                    )),
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let name = match self {
                    $($variant => $name,)+
                };
                f.pad(name)
            }
        }
    };
}

lowercase_names!(PatternCategory,
    "compute" => PatternCategory::Compute,
    "networking" => PatternCategory::Networking,
    "storage" => PatternCategory::Storage,
    "database" => PatternCategory::Database,
    "security" => PatternCategory::Security,
    "application" => PatternCategory::Application,
    "monitoring" => PatternCategory::Monitoring,
);

lowercase_names!(CloudProvider,
    "aws" => CloudProvider::Aws,
    "azure" => CloudProvider::Azure,
    "gcp" => CloudProvider::Gcp,
    "generic" => CloudProvider::Generic,
);

lowercase_names!(ComplexityLevel,
    "basic" => ComplexityLevel::Basic,
    "intermediate" => ComplexityLevel::Intermediate,
    "advanced" => ComplexityLevel::Advanced,
);

/// A reusable configuration template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: PatternCategory,
    pub provider: CloudProvider,
    pub complexity: ComplexityLevel,
    /// File name to template content
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Criteria for [`PatternRepository::find`]; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PatternFilter {
    #[serde(default)]
    pub category: Option<PatternCategory>,
    #[serde(default)]
    pub provider: Option<CloudProvider>,
    #[serde(default)]
    pub complexity: Option<ComplexityLevel>,
    /// Match when any of these equals any pattern tag, ignoring case
    #[serde(default)]
    pub tags: Vec<String>,
    /// Case-insensitive substring of name, description or id
    #[serde(default)]
    pub query: Option<String>,
}

impl PatternFilter {
    pub fn matches(&self, pattern: &Pattern) -> bool {
        if self.category.is_some_and(|c| c != pattern.category) {
            return false;
        }
        if self.provider.is_some_and(|p| p != pattern.provider) {
            return false;
        }
        if self.complexity.is_some_and(|c| c != pattern.complexity) {
            return false;
        }
        if !self.tags.is_empty()
            && !self
                .tags
                .iter()
                .any(|want| pattern.tags.iter().any(|have| have.eq_ignore_ascii_case(want)))
        {
            return false;
        }
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            let q = query.to_lowercase();
            let hit = pattern.name.to_lowercase().contains(&q)
                || pattern.description.to_lowercase().contains(&q)
                || pattern.id.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        true
    }
}

pub struct PatternRepository {
    patterns: RwLock<HashMap<String, Pattern>>,
}

impl PatternRepository {
    pub fn new() -> Self {
        Self {
            patterns: RwLock::new(HashMap::new()),
        }
    }

    /// Repository seeded with the built-in corpus
    pub fn with_defaults() -> Self {
        let repo = Self::new();
        repo.replace_all(defaults::default_patterns());
        repo
    }

    /// Read a JSON array of patterns into a fresh repository
    pub fn load_index(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let patterns: Vec<Pattern> = serde_json::from_str(&content)?;
        info!("Loaded {} patterns from {}", patterns.len(), path.display());
        let repo = Self::new();
        repo.replace_all(patterns);
        Ok(repo)
    }

    pub fn get(&self, id: &str) -> Result<Pattern> {
        self.patterns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| Error::PatternNotFound(id.to_string()))
    }

    /// Every pattern accepted by the filter, sorted by id
    pub fn find(&self, filter: &PatternFilter) -> Vec<Pattern> {
        let guard = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
        let mut found: Vec<Pattern> = guard
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        debug!("Pattern query matched {} of {}", found.len(), guard.len());
        found
    }

    pub fn all(&self) -> Vec<Pattern> {
        self.find(&PatternFilter::default())
    }

    pub fn insert(&self, pattern: Pattern) {
        self.patterns
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pattern.id.clone(), pattern);
    }

    /// Swap in a new corpus in one write
    pub fn replace_all(&self, patterns: impl IntoIterator<Item = Pattern>) {
        let fresh: HashMap<String, Pattern> =
            patterns.into_iter().map(|p| (p.id.clone(), p)).collect();
        *self.patterns.write().unwrap_or_else(PoisonError::into_inner) = fresh;
    }

    pub fn len(&self) -> usize {
        self.patterns.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PatternRepository {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::tempdir;

    #[test]
    fn test_get_by_id() {
        let repo = PatternRepository::with_defaults();
        let vpc = repo.get("aws-vpc-basic").unwrap();
        assert_eq!(vpc.provider, CloudProvider::Aws);
        assert!(vpc.files.contains_key("main.tf"));
    }

    #[test]
    fn test_enum_names_roundtrip() {
        assert_eq!(CloudProvider::Gcp.to_string(), "gcp");
        assert_eq!(
            PatternCategory::from_str(&PatternCategory::Monitoring.to_string()).unwrap(),
            PatternCategory::Monitoring
        );
        assert_eq!(format!("{:<6}|", ComplexityLevel::Basic), "basic |");
    }

    #[test]
    fn test_missing_id() {
        let repo = PatternRepository::with_defaults();
        let err = repo.get("nope").unwrap_err();
        assert!(matches!(err, Error::PatternNotFound(ref id) if id == "nope"));
        assert_eq!(err.to_string(), "pattern not found: nope");
    }

    #[test]
    fn test_filter_by_category_and_provider() {
        let repo = PatternRepository::with_defaults();
        let found = repo.find(&PatternFilter {
            category: Some(PatternCategory::Networking),
            provider: Some(CloudProvider::Aws),
            ..Default::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "aws-vpc-basic");

        let networking = repo.find(&PatternFilter {
            category: Some(PatternCategory::Networking),
            ..Default::default()
        });
        let ids: Vec<&str> = networking.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["aws-vpc-basic", "azure-vnet-basic", "gcp-vpc-basic"]);
    }

    #[test]
    fn test_filter_tags_any_case_insensitive() {
        let repo = PatternRepository::with_defaults();
        let found = repo.find(&PatternFilter {
            tags: vec!["EC2".into(), "nothing".into()],
            ..Default::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "aws-ec2-web-server");
    }

    #[test]
    fn test_filter_query_substring() {
        let repo = PatternRepository::with_defaults();
        let found = repo.find(&PatternFilter {
            query: Some("VIRTUAL NETWORK".into()),
            ..Default::default()
        });
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].provider, CloudProvider::Azure);
        assert_eq!(repo.all().len(), repo.len());
    }

    #[test]
    fn test_replace_all_and_load_index() {
        let repo = PatternRepository::with_defaults();
        let pattern = repo.get("gcp-vpc-basic").unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        std::fs::write(&path, serde_json::to_string(&vec![pattern.clone()]).unwrap()).unwrap();

        let loaded = PatternRepository::load_index(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("gcp-vpc-basic").unwrap(), pattern);

        repo.replace_all(vec![]);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(PatternCategory::from_str("Compute").unwrap(), PatternCategory::Compute);
        assert_eq!(CloudProvider::from_str("gcp").unwrap(), CloudProvider::Gcp);
        assert!(ComplexityLevel::from_str("expert").is_err());
    }
}
