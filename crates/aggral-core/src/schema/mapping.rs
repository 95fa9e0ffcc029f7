use super::db::{ColumnId, TableId};
use super::domain::ModelId;
use indexmap::IndexMap;

/// The structural decisions downstream CRUD generation consumes: which table
/// each model landed in and how each of its fields is represented.
///
/// Value objects have no entries; they exist only as flattened columns on
/// the tables that embed them.
#[derive(Debug, Default)]
pub struct Mapping {
    pub models: IndexMap<ModelId, Model>,
}

#[derive(Debug)]
pub struct Model {
    pub id: ModelId,

    /// Table the model's rows live in
    pub table: TableId,

    /// One entry per model field, in declaration order
    pub fields: Vec<Field>,
}

/// How a single domain field is represented relationally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// One column on the model's own table
    Scalar { column: ColumnId },

    /// Value object flattened into the model's table
    Embedded { columns: Vec<ColumnId> },

    /// Singular child entity; the child table carries the foreign key back
    Child { table: TableId },

    /// Identifier column pointing across an aggregate boundary
    AggregateRef { column: ColumnId },

    /// Collection normalized into its own table
    Collection { table: TableId },
}

impl Mapping {
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("no mapping for model")
    }

    pub(crate) fn model_mut(&mut self, id: impl Into<ModelId>) -> &mut Model {
        self.models
            .get_mut(&id.into())
            .expect("no mapping for model")
    }
}
