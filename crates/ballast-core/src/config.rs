//! Project configuration for ballast
//!
//! Configuration is stored in `ballast.toml` at the project root. An absent
//! file behaves as the built-in defaults; saving rewrites the whole file.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{ConfigCatalog, LabeledKey};
use crate::error::{BallastError, Result};
use crate::item::{DatasourceDescriptor, IndexDescriptor};
use crate::schema::{IndexSchema, InMemorySchema};
use crate::weight::{self, WeightEntry, WeightTable};

pub use types::{
    CatalogConfig, Config, DatasourceConfig, FieldConfig, IndexConfig, ProcessorEntry,
    StatsConfig, CONFIG_FILE, CONTENT_KIND,
};

impl Config {
    /// Path of the configuration file under `root`.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BallastError::ConfigNotFound {
                search_root: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(BallastError::invalid_config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `root`, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = Self::path_in(root);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to a file, replacing it whole.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check the machine-name invariant over every classification key the
    /// file carries.
    pub fn validate(&self) -> Result<()> {
        for (id, entry) in &self.processors {
            if !weight::is_valid_key(id) {
                return Err(BallastError::invalid_key("processor", id));
            }
            for row in entry.weight_table.entries() {
                if !weight::is_valid_key(&row.key) {
                    return Err(BallastError::invalid_key("weight table", &row.key));
                }
            }
        }
        for ds in &self.index.datasources {
            for bundle in &ds.bundles {
                if !weight::is_valid_key(&bundle.id) {
                    return Err(BallastError::invalid_key("bundle", &bundle.id));
                }
            }
        }
        for role in &self.catalog.roles {
            if !weight::is_valid_key(&role.id) {
                return Err(BallastError::invalid_key("role", &role.id));
            }
        }
        Ok(())
    }

    /// Configuration for one processor; an absent entry is the default.
    pub fn processor(&self, id: &str) -> ProcessorEntry {
        self.processors.get(id).cloned().unwrap_or_default()
    }

    /// Mutable configuration for one processor, created on first access.
    pub fn processor_mut(&mut self, id: &str) -> &mut ProcessorEntry {
        self.processors.entry(id.to_string()).or_default()
    }

    /// Static description of the configured index.
    pub fn index_descriptor(&self) -> IndexDescriptor {
        IndexDescriptor {
            id: self.index.id.clone(),
            datasources: self
                .index
                .datasources
                .iter()
                .map(|ds| DatasourceDescriptor {
                    id: ds.id.clone(),
                    entity_kind: ds.entity_kind.clone(),
                    bundles: ds.bundles.clone(),
                })
                .collect(),
        }
    }

    /// In-memory schema of the declared index fields.
    pub fn schema(&self) -> InMemorySchema {
        InMemorySchema::with_fields(self.index.fields.iter().map(FieldConfig::to_spec).collect())
    }

    /// Replace the declared fields with the schema's current state, used
    /// after provisioning.
    pub fn apply_schema(&mut self, schema: &dyn IndexSchema) {
        self.index.fields = schema.fields().iter().map(FieldConfig::from_spec).collect();
    }

    /// Catalog over the configured enumerations.
    pub fn catalog(&self) -> ConfigCatalog {
        ConfigCatalog::new(self.catalog.roles.clone())
    }

    /// Absolute path of the content directory.
    pub fn content_path(&self, root: &Path) -> PathBuf {
        if self.content_dir.is_absolute() {
            self.content_dir.clone()
        } else {
            root.join(&self.content_dir)
        }
    }

    /// Absolute path of the view counter database.
    pub fn stats_db_path(&self, root: &Path) -> PathBuf {
        if self.stats.db.is_absolute() {
            self.stats.db.clone()
        } else {
            root.join(&self.stats.db)
        }
    }

    /// Starter configuration written by `ballast init`: one content
    /// datasource with a few bundles, a visible title field, and the
    /// built-in processors disabled.
    pub fn scaffold() -> Self {
        let mut config = Config {
            index: IndexConfig {
                id: "default".to_string(),
                datasources: vec![DatasourceConfig {
                    id: CONTENT_KIND.to_string(),
                    entity_kind: CONTENT_KIND.to_string(),
                    bundles: vec![
                        LabeledKey::new("article", "Article"),
                        LabeledKey::new("page", "Page"),
                        LabeledKey::new("blog_post", "Blog post"),
                    ],
                }],
                fields: vec![FieldConfig {
                    id: "title".to_string(),
                    field_type: crate::fields::FieldType::Text,
                    label: Some("Title".to_string()),
                    hidden: false,
                }],
            },
            ..Config::default()
        };

        let bundle = config.processor_mut("bundle");
        bundle.weight_table = WeightTable::from(vec![
            WeightEntry::new("article", 1),
            WeightEntry::new("page", 0),
        ]);
        config.processor_mut("role");
        config.processor_mut("stats");
        config
    }
}
