use super::Schema;
use crate::schema::db::{CascadeAction, Table, TableId};
use crate::{Error, Result};
use std::collections::HashSet;

/// Structural sanity checks over a freshly built schema. These guard the
/// builder's own invariants; a failure here is a bug in derivation, not in
/// the caller's input.
struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(crate) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        let mut names = HashSet::new();

        for table in &self.schema.db.tables {
            if !names.insert(table.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate table name `{}`",
                    table.name
                )));
            }

            self.verify_table(table)?;
        }

        self.verify_mapping()
    }

    fn verify_table(&self, table: &Table) -> Result<()> {
        let mut names = HashSet::new();

        for column in &table.columns {
            if !names.insert(column.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate column `{}` on table `{}`",
                    column.name, table.name
                )));
            }

            if column.id.table != table.id {
                return Err(Error::invalid_schema(format!(
                    "column `{}` does not belong to table `{}`",
                    column.name, table.name
                )));
            }
        }

        let primary_keys = table
            .columns
            .iter()
            .filter(|column| column.primary_key)
            .count();

        if table.class.is_some() {
            // Entity tables are keyed by a single synthesized `id`
            match table.primary_key_column() {
                Some(pk) if primary_keys == 1 && pk.name == "id" => {}
                _ => {
                    return Err(Error::invalid_schema(format!(
                        "entity table `{}` must have exactly one primary key column named `id`",
                        table.name
                    )));
                }
            }
        } else {
            // Junction tables have no row identity of their own; uniqueness
            // comes from their constraint
            if primary_keys != 0 {
                return Err(Error::invalid_schema(format!(
                    "junction table `{}` must not have a primary key",
                    table.name
                )));
            }
            if table.uniques.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "junction table `{}` must have a uniqueness constraint",
                    table.name
                )));
            }
        }

        for fk in &table.foreign_keys {
            self.verify_foreign_key(table, fk.references_table, &fk.references_column)?;

            if fk.on_delete != CascadeAction::Cascade {
                return Err(Error::invalid_schema(format!(
                    "foreign key on `{}` must cascade on delete",
                    table.name
                )));
            }

            // Referenced tables precede their referrers, so the emission
            // order is valid for sequential table creation
            if fk.references_table.0 >= table.id.0 {
                return Err(Error::invalid_schema(format!(
                    "table `{}` references a table emitted after it",
                    table.name
                )));
            }
        }

        Ok(())
    }

    fn verify_foreign_key(
        &self,
        table: &Table,
        references_table: TableId,
        references_column: &str,
    ) -> Result<()> {
        let target = self.schema.db.table(references_table);

        match target.column_by_name(references_column) {
            Some(column) if column.primary_key => Ok(()),
            _ => Err(Error::invalid_schema(format!(
                "foreign key on `{}` must reference a primary key column",
                table.name
            ))),
        }
    }

    fn verify_mapping(&self) -> Result<()> {
        for (model_id, mapped) in &self.schema.mapping.models {
            let model = self.schema.domain.model(*model_id);

            if !model.is_entity() {
                return Err(Error::invalid_schema(format!(
                    "value object `{}` must not map to a table",
                    model.name.upper_camel_case()
                )));
            }

            let table = self.schema.db.table(mapped.table);
            if table.class != Some(*model_id) {
                return Err(Error::invalid_schema(format!(
                    "mapping for `{}` points at table `{}` storing a different class",
                    model.name.upper_camel_case(),
                    table.name
                )));
            }

            if mapped.fields.len() != model.fields.len() {
                return Err(Error::invalid_schema(format!(
                    "mapping for `{}` does not cover every field",
                    model.name.upper_camel_case()
                )));
            }
        }

        Ok(())
    }
}
