//! Items flowing through the indexing pipeline

use crate::catalog::LabeledKey;
use crate::fields::{Field, FieldSet, FieldType};
use crate::schema::IndexSchema;

/// Static description of one datasource feeding the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasourceDescriptor {
    pub id: String,
    pub entity_kind: String,
    pub bundles: Vec<LabeledKey>,
}

/// Static description of the index a processor may support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub id: String,
    pub datasources: Vec<DatasourceDescriptor>,
}

impl IndexDescriptor {
    /// True when any datasource feeds items of this entity kind.
    pub fn has_entity_kind(&self, kind: &str) -> bool {
        self.datasources.iter().any(|ds| ds.entity_kind == kind)
    }

    /// Bundles declared across all datasources, in declaration order.
    /// A bundle id declared twice keeps its first label.
    pub fn bundles(&self) -> Vec<LabeledKey> {
        let mut seen: Vec<LabeledKey> = Vec::new();
        for ds in &self.datasources {
            for bundle in &ds.bundles {
                if !seen.iter().any(|b| b.id == bundle.id) {
                    seen.push(bundle.clone());
                }
            }
        }
        seen
    }
}

/// One unit being indexed: its provenance, classification inputs, and the
/// destination slots processors stamp weights into.
#[derive(Debug, Clone)]
pub struct Item {
    id: String,
    datasource: String,
    entity_kind: String,
    bundle: String,
    author_role: Option<String>,
    title: String,
    fields: FieldSet,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        datasource: impl Into<String>,
        entity_kind: impl Into<String>,
        bundle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            datasource: datasource.into(),
            entity_kind: entity_kind.into(),
            bundle: bundle.into(),
            author_role: None,
            title: String::new(),
            fields: FieldSet::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_author_role(mut self, role: impl Into<String>) -> Self {
        self.author_role = Some(role.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn datasource(&self) -> &str {
        &self.datasource
    }

    pub fn entity_kind(&self) -> &str {
        &self.entity_kind
    }

    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Role of the item's author, when the datasource exposes one.
    pub fn author_role(&self) -> Option<&str> {
        self.author_role.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    /// Materialize destination slots for every integer field the schema
    /// declares. Items carry slots only for declared fields; stamping into an
    /// undeclared field is a no-op for the processor.
    pub fn seed_fields(&mut self, schema: &dyn IndexSchema) {
        for spec in schema.fields() {
            if spec.field_type() == FieldType::Integer {
                self.fields.insert(Field::new(spec.id()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, InMemorySchema};

    fn two_source_index() -> IndexDescriptor {
        IndexDescriptor {
            id: "default".to_string(),
            datasources: vec![
                DatasourceDescriptor {
                    id: "content".to_string(),
                    entity_kind: "content".to_string(),
                    bundles: vec![
                        LabeledKey::new("article", "Article"),
                        LabeledKey::new("page", "Page"),
                    ],
                },
                DatasourceDescriptor {
                    id: "media".to_string(),
                    entity_kind: "media".to_string(),
                    bundles: vec![
                        LabeledKey::new("image", "Image"),
                        LabeledKey::new("article", "Media article"),
                    ],
                },
            ],
        }
    }

    #[test]
    fn entity_kind_lookup() {
        let index = two_source_index();
        assert!(index.has_entity_kind("content"));
        assert!(index.has_entity_kind("media"));
        assert!(!index.has_entity_kind("user"));
    }

    #[test]
    fn bundles_keep_declaration_order_and_first_label() {
        let index = two_source_index();
        let bundles = index.bundles();
        let ids: Vec<&str> = bundles.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["article", "page", "image"]);
        assert_eq!(bundles[0].label, "Article");
    }

    #[test]
    fn seed_fields_creates_integer_slots_only() {
        let schema = InMemorySchema::with_fields(vec![
            FieldSpec::new("title", crate::fields::FieldType::Text, "Title"),
            FieldSpec::new("bundle_weight", crate::fields::FieldType::Integer, "Bundle weight"),
        ]);
        let mut item = Item::new("a1", "content", "content", "article");
        item.seed_fields(&schema);
        assert!(item.fields().get("bundle_weight").is_some());
        assert!(item.fields().get("title").is_none());
    }
}
