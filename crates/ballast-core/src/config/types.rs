//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::LabeledKey;
use crate::fields::FieldType;
use crate::schema::FieldSpec;
use crate::weight::WeightTable;

/// Name of the configuration file at the project root
pub const CONFIG_FILE: &str = "ballast.toml";

/// Entity kind whose items carry bundle classifications
pub const CONTENT_KIND: &str = "content";

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the content corpus, relative to the project root
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// The index processors run against
    #[serde(default)]
    pub index: IndexConfig,

    /// Enumeration of known roles
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// View counter location
    #[serde(default)]
    pub stats: StatsConfig,

    /// Per-processor configuration, keyed by processor id
    #[serde(default)]
    pub processors: BTreeMap<String, ProcessorEntry>,
}

/// Description of the search index: its datasources and declared fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Index id
    #[serde(default = "default_index_id")]
    pub id: String,

    /// Datasources feeding the index
    #[serde(default)]
    pub datasources: Vec<DatasourceConfig>,

    /// Declared index fields
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One datasource feeding the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasourceConfig {
    /// Datasource id
    pub id: String,

    /// Entity kind this datasource feeds
    #[serde(default = "default_entity_kind")]
    pub entity_kind: String,

    /// Bundles the datasource declares, in display order
    #[serde(default)]
    pub bundles: Vec<LabeledKey>,
}

/// One declared index field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Field id
    pub id: String,

    /// Value type
    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    /// Display label (defaults to the field id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Hidden fields are processor-managed
    #[serde(default)]
    pub hidden: bool,
}

impl FieldConfig {
    pub fn to_spec(&self) -> FieldSpec {
        let label = self.label.clone().unwrap_or_else(|| self.id.clone());
        let mut spec = FieldSpec::new(&self.id, self.field_type, label);
        spec.set_hidden(self.hidden);
        spec
    }

    pub fn from_spec(spec: &FieldSpec) -> Self {
        Self {
            id: spec.id().to_string(),
            field_type: spec.field_type(),
            label: Some(spec.label().to_string()),
            hidden: spec.hidden(),
        }
    }
}

/// Enumeration of known roles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Known roles, in display order
    #[serde(default = "default_roles")]
    pub roles: Vec<LabeledKey>,
}

/// View counter location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Path of the SQLite counter database, relative to the project root
    #[serde(default = "default_stats_db")]
    pub db: PathBuf,
}

/// Per-processor persisted configuration.
///
/// Mutated only through editor submission; an absent entry behaves as the
/// default (disabled, empty table, default weight 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorEntry {
    /// Whether the processor runs during indexing
    #[serde(default)]
    pub enabled: bool,

    /// Weight used when a classification key has no table entry
    #[serde(default)]
    pub default_weight: i64,

    /// Entity kinds the stats processor may stamp; other processors ignore it
    #[serde(
        default = "default_entity_kinds",
        skip_serializing_if = "is_default_entity_kinds"
    )]
    pub allowed_entity_kinds: Vec<String>,

    /// Explicit weight assignments, keyed by classification key
    #[serde(default, skip_serializing_if = "WeightTable::is_empty")]
    pub weight_table: WeightTable,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_index_id() -> String {
    "default".to_string()
}

fn default_entity_kind() -> String {
    CONTENT_KIND.to_string()
}

fn default_entity_kinds() -> Vec<String> {
    vec![CONTENT_KIND.to_string()]
}

fn is_default_entity_kinds(kinds: &[String]) -> bool {
    kinds == [CONTENT_KIND]
}

fn default_roles() -> Vec<LabeledKey> {
    vec![
        LabeledKey::new("anonymous", "Anonymous"),
        LabeledKey::new("authenticated", "Authenticated"),
        LabeledKey::new("editor", "Editor"),
    ]
}

fn default_stats_db() -> PathBuf {
    PathBuf::from(".ballast/stats.db")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content_dir: default_content_dir(),
            index: IndexConfig::default(),
            catalog: CatalogConfig::default(),
            stats: StatsConfig::default(),
            processors: BTreeMap::new(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            id: default_index_id(),
            datasources: Vec::new(),
            fields: Vec::new(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            roles: default_roles(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            db: default_stats_db(),
        }
    }
}

impl Default for ProcessorEntry {
    fn default() -> Self {
        ProcessorEntry {
            enabled: false,
            default_weight: 0,
            allowed_entity_kinds: default_entity_kinds(),
            weight_table: WeightTable::new(),
        }
    }
}
