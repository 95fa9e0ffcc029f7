use super::{ColumnId, TableId};

/// A foreign key from one table's column to another table's column.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    /// The referring column
    pub column: ColumnId,

    /// The table the key points at
    pub references_table: TableId,

    /// The referenced column name; always `id` for ownership links
    pub references_column: String,

    /// What happens to dependent rows when the referenced row is deleted
    pub on_delete: CascadeAction,
}

/// Referential delete policy. Ownership links emitted by this engine always
/// cascade; the other variants exist for downstream DDL renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeAction {
    Cascade,
    Restrict,
    SetNull,
}
