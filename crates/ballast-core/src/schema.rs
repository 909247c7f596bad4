//! Index schema access for destination-field provisioning

use crate::error::{BallastError, Result};
use crate::fields::FieldType;

/// A field declared on the search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    id: String,
    field_type: FieldType,
    label: String,
    hidden: bool,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            hidden: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Hidden fields are managed by their processor and kept out of the
    /// administrative field list.
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

/// Mutable view of an index's declared fields.
///
/// Processors provision their destination fields through this trait at
/// pre-index-save time.
pub trait IndexSchema {
    /// Spec for a declared field, if any.
    fn field(&self, id: &str) -> Option<&FieldSpec>;

    fn field_mut(&mut self, id: &str) -> Option<&mut FieldSpec>;

    /// All declared fields in declaration order.
    fn fields(&self) -> &[FieldSpec];

    /// Ensure a field with this id and type is declared, creating it when
    /// absent. A field already declared with a different type is a
    /// configuration error.
    fn ensure_field(
        &mut self,
        id: &str,
        field_type: FieldType,
        label: &str,
    ) -> Result<&mut FieldSpec>;
}

/// In-memory schema used by the reference pipeline and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchema {
    fields: Vec<FieldSpec>,
}

impl InMemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }
}

impl IndexSchema for InMemorySchema {
    fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id() == id)
    }

    fn field_mut(&mut self, id: &str) -> Option<&mut FieldSpec> {
        self.fields.iter_mut().find(|f| f.id() == id)
    }

    fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn ensure_field(
        &mut self,
        id: &str,
        field_type: FieldType,
        label: &str,
    ) -> Result<&mut FieldSpec> {
        if let Some(pos) = self.fields.iter().position(|f| f.id() == id) {
            if self.fields[pos].field_type() != field_type {
                return Err(BallastError::FieldTypeMismatch {
                    field: id.to_string(),
                    expected: field_type.to_string(),
                    found: self.fields[pos].field_type().to_string(),
                });
            }
            return Ok(&mut self.fields[pos]);
        }

        self.fields.push(FieldSpec::new(id, field_type, label));
        let last = self.fields.len() - 1;
        Ok(&mut self.fields[last])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_field_creates_when_absent() {
        let mut schema = InMemorySchema::new();
        let spec = schema
            .ensure_field("role_weight", FieldType::Integer, "Role weight")
            .unwrap();
        assert_eq!(spec.id(), "role_weight");
        assert!(!spec.hidden());
        assert_eq!(schema.fields().len(), 1);
    }

    #[test]
    fn ensure_field_is_idempotent() {
        let mut schema = InMemorySchema::new();
        schema
            .ensure_field("role_weight", FieldType::Integer, "Role weight")
            .unwrap();
        schema
            .ensure_field("role_weight", FieldType::Integer, "Role weight")
            .unwrap();
        assert_eq!(schema.fields().len(), 1);
    }

    #[test]
    fn ensure_field_preserves_hidden_flag() {
        let mut schema = InMemorySchema::new();
        schema
            .ensure_field("role_weight", FieldType::Integer, "Role weight")
            .unwrap()
            .set_hidden(true);
        let spec = schema
            .ensure_field("role_weight", FieldType::Integer, "Role weight")
            .unwrap();
        assert!(spec.hidden());
    }

    #[test]
    fn ensure_field_rejects_type_conflict() {
        let mut schema = InMemorySchema::with_fields(vec![FieldSpec::new(
            "bundle_weight",
            FieldType::Text,
            "Bundle weight",
        )]);
        let err = schema
            .ensure_field("bundle_weight", FieldType::Integer, "Bundle weight")
            .unwrap_err();
        assert!(matches!(err, BallastError::FieldTypeMismatch { .. }));
    }
}
