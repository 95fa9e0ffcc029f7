use super::{Column, ColumnId, ForeignKey};
use crate::schema::domain::ModelId;
use std::fmt;

/// A relational table generated from the domain model.
#[derive(Debug, PartialEq)]
pub struct Table {
    /// Uniquely identifies a table
    pub id: TableId,

    /// Name of the table
    pub name: String,

    /// The domain class stored in this table, when it stores one directly.
    /// Junction tables for scalar and value-object collections have none.
    pub class: Option<ModelId>,

    /// The table's columns
    pub columns: Vec<Column>,

    pub foreign_keys: Vec<ForeignKey>,

    pub uniques: Vec<UniqueConstraint>,

    /// True when this table stores an aggregate root
    pub aggregate_root: bool,
}

/// Uniquely identifies a table
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct TableId(pub usize);

/// Uniqueness constraint over a set of columns. Junction tables rely on
/// these instead of a primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueConstraint {
    pub columns: Vec<ColumnId>,
}

impl Table {
    pub(crate) fn new(id: TableId, name: String) -> Self {
        Self {
            id,
            name,
            class: None,
            columns: vec![],
            foreign_keys: vec![],
            uniques: vec![],
            aggregate_root: false,
        }
    }

    pub fn column(&self, id: impl Into<ColumnId>) -> &Column {
        &self.columns[id.into().index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key_column(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.primary_key)
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({})", self.0)
    }
}
