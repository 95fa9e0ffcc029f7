use super::{Table, TableId};

/// The relational half of a derived schema.
///
/// Tables appear in foreign-key-safe creation order: every foreign key's
/// referenced table precedes the table that declares the key, so the sequence
/// can be emitted as `CREATE TABLE IF NOT EXISTS` statements as-is.
#[derive(Debug, PartialEq, Default)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        &self.tables[id.into().0]
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }
}
