use super::{Field, FieldId};
use crate::schema::Name;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: Name,

    /// Classification, computed once at ingestion from the superclass chain
    pub kind: ModelKind,

    /// Fields contained by the model
    pub fields: Vec<Field>,
}

/// Schema-level classification of a domain class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Identity-less and immutable; always flattened into the embedding
    /// table, never a table of its own
    ValueObject,

    /// Has persistent identity and its own table
    Entity,

    /// The entry point of a consistency boundary; owns nested entities and
    /// value objects
    AggregateRoot,

    /// The superclass chain matched no recognized marker. Rejected if
    /// reachable from an aggregate.
    Unknown,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

impl Model {
    pub fn is_value_object(&self) -> bool {
        matches!(self.kind, ModelKind::ValueObject)
    }

    /// Returns true for entities and aggregate roots: both have identity and
    /// their own table.
    pub fn is_entity(&self) -> bool {
        matches!(self.kind, ModelKind::Entity | ModelKind::AggregateRoot)
    }

    pub fn is_aggregate_root(&self) -> bool {
        matches!(self.kind, ModelKind::AggregateRoot)
    }

    pub fn field(&self, field: impl Into<FieldId>) -> &Field {
        let field_id = field.into();
        assert_eq!(self.id, field_id.model);
        &self.fields[field_id.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl ModelId {
    /// Create a `FieldId` representing the current model's field at index
    /// `index`.
    pub const fn field(self, index: usize) -> FieldId {
        FieldId { model: self, index }
    }
}

impl From<&Self> for ModelId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
