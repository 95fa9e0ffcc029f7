use super::BuildSchema;
use crate::dialect::Dialect;
use crate::schema::{
    db::{self, CascadeAction, ColumnId, ForeignKey, UniqueConstraint},
    domain::{self, CollectionKind, ElementTy, FieldTy, ModelId, ModelKind, ScalarType},
    mapping,
    relation::{OwnershipLink, Relation},
};
use crate::{Error, Result};
use std::mem;

impl BuildSchema<'_> {
    /// Reserves a table per reachable entity plus a junction table per
    /// collection field that needs one.
    ///
    /// The dependency order is walked in reverse so owners precede the
    /// children and junction tables that hold foreign keys into them: the
    /// resulting table sequence is safe for sequential `CREATE TABLE`.
    pub(super) fn reserve_tables(&mut self) -> Result<()> {
        let analysis = self.analysis;
        let domain = self.domain;

        for &model_id in analysis.order.iter().rev() {
            let model = domain.model(model_id);
            if !model.is_entity() {
                // Value objects are flattened wherever they are embedded
                continue;
            }

            let name = self.table_name_for_model(model);
            let table_id = self.register_table(&name)?;
            self.tables.push(db::Table::new(table_id, name.clone()));
            self.mapping.models.insert(
                model.id,
                mapping::Model {
                    id: model.id,
                    table: table_id,
                    fields: vec![],
                },
            );

            for field in &model.fields {
                let Some(collection) = field.ty.as_collection() else {
                    continue;
                };

                if self.needs_junction_table(collection) {
                    let junction_name = format!("{}_{}_items", name, field.name);
                    let junction_id = self.register_table(&junction_name)?;
                    self.tables.push(db::Table::new(junction_id, junction_name));
                    self.junction_tables.insert(field.id, junction_id);
                }
            }
        }

        Ok(())
    }

    /// Entity collections live in the entity's own table; every other
    /// element kind is normalized into a junction table.
    fn needs_junction_table(&self, collection: &domain::Collection) -> bool {
        match collection.element {
            ElementTy::Scalar(_) => true,
            ElementTy::Model(target) => !matches!(
                self.domain.model(target).kind,
                ModelKind::Entity
            ),
        }
    }

    pub(super) fn populate_tables(&mut self) -> Result<()> {
        let model_ids: Vec<_> = self.mapping.models.keys().copied().collect();

        for model_id in model_ids {
            self.populate_entity_table(model_id)?;
        }

        Ok(())
    }

    fn populate_entity_table(&mut self, model_id: ModelId) -> Result<()> {
        let domain = self.domain;
        let dialect = self.dialect;
        let analysis = self.analysis;

        let model = domain.model(model_id);
        let table_id = self.mapping.model(model_id).table;

        // Take the table out of its slot while populating; junction tables
        // in other slots are populated along the way.
        let placeholder = db::Table::new(table_id, String::new());
        let mut table = mem::replace(&mut self.tables[table_id.0], placeholder);
        table.class = Some(model.id);
        table.aggregate_root = model.is_aggregate_root();

        // Identity first: every entity table is keyed by a single `id`
        let id_column = Self::push_column(
            &mut table,
            "id",
            ScalarType::Uuid,
            dialect,
            false,
            true,
            false,
        )?;

        // Parent link, when this entity is owned by another model
        if let Some(&ownership) = analysis.owners.get(&model_id) {
            let parent_table = self.mapping.model(ownership.parent).table;
            let parent_name = self.tables[parent_table.0].name.clone();

            let fk_column = Self::push_column(
                &mut table,
                &format!("{parent_name}_id"),
                ScalarType::Uuid,
                dialect,
                false,
                false,
                true,
            )?;
            table.foreign_keys.push(ForeignKey {
                column: fk_column,
                references_table: parent_table,
                references_column: "id".to_string(),
                on_delete: CascadeAction::Cascade,
            });

            match ownership.link {
                OwnershipLink::Singular => {
                    // One child row per parent
                    table.uniques.push(UniqueConstraint {
                        columns: vec![fk_column],
                    });
                }
                OwnershipLink::Set => {}
                OwnershipLink::List => {
                    let position = Self::push_column(
                        &mut table,
                        "position",
                        ScalarType::Int,
                        dialect,
                        false,
                        false,
                        false,
                    )?;
                    table.uniques.push(UniqueConstraint {
                        columns: vec![fk_column, position],
                    });
                }
                OwnershipLink::Map(key) => {
                    let map_key = Self::push_column(
                        &mut table, "map_key", key, dialect, false, false, false,
                    )?;
                    table.uniques.push(UniqueConstraint {
                        columns: vec![fk_column, map_key],
                    });
                }
            }
        }

        let mut fields = Vec::with_capacity(model.fields.len());

        for field in &model.fields {
            // A declared `id` field is the identity; it folds into the
            // synthesized primary key column
            if field.name == "id" {
                fields.push(mapping::Field::Scalar { column: id_column });
                continue;
            }

            let relation = analysis
                .relations
                .get(&field.id)
                .copied()
                .expect("field was not analyzed");

            match relation {
                Relation::Scalar => {
                    let scalar = field.ty.as_scalar().expect("scalar relation on non-scalar");
                    let column = Self::push_column(
                        &mut table,
                        &field.name,
                        scalar,
                        dialect,
                        field.nullable,
                        false,
                        false,
                    )?;
                    fields.push(mapping::Field::Scalar { column });
                }
                Relation::Embedded(target) => {
                    let mut columns = vec![];
                    Self::flatten_value_object(
                        domain,
                        dialect,
                        &mut table,
                        target,
                        &field.name,
                        field.nullable,
                        &mut columns,
                    )?;
                    fields.push(mapping::Field::Embedded { columns });
                }
                Relation::Child(child) => {
                    // The child's own table carries the foreign key back
                    fields.push(mapping::Field::Child {
                        table: self.mapping.model(child).table,
                    });
                }
                Relation::AggregateRef(_) => {
                    let column = Self::push_column(
                        &mut table,
                        &format!("{}_id", field.name),
                        ScalarType::Uuid,
                        dialect,
                        field.nullable,
                        false,
                        false,
                    )?;
                    fields.push(mapping::Field::AggregateRef { column });
                }
                Relation::CollectionTable => {
                    let collection = field
                        .ty
                        .as_collection()
                        .expect("collection relation on non-collection");

                    let collection_table =
                        if let Some(&junction) = self.junction_tables.get(&field.id) {
                            self.populate_junction_table(
                                junction,
                                table_id,
                                &table.name,
                                collection,
                            )?;
                            junction
                        } else {
                            let element = collection
                                .element
                                .as_model()
                                .expect("entity collections have a model element");
                            self.mapping.model(element).table
                        };

                    fields.push(mapping::Field::Collection {
                        table: collection_table,
                    });
                }
            }
        }

        self.tables[table_id.0] = table;
        self.mapping.model_mut(model_id).fields = fields;

        Ok(())
    }

    /// Junction tables normalize scalar, value-object, and cross-aggregate
    /// collections out of the owning table.
    fn populate_junction_table(
        &mut self,
        junction: db::TableId,
        owner: db::TableId,
        owner_name: &str,
        collection: &domain::Collection,
    ) -> Result<()> {
        let domain = self.domain;
        let dialect = self.dialect;
        let table = &mut self.tables[junction.0];

        let parent = Self::push_column(
            table,
            &format!("{owner_name}_id"),
            ScalarType::Uuid,
            dialect,
            false,
            false,
            true,
        )?;
        table.foreign_keys.push(ForeignKey {
            column: parent,
            references_table: owner,
            references_column: "id".to_string(),
            on_delete: CascadeAction::Cascade,
        });

        // Lists key rows by position, maps by key; sets key by the value
        // itself
        let keyed = match collection.kind {
            CollectionKind::List => Some(Self::push_column(
                table,
                "position",
                ScalarType::Int,
                dialect,
                false,
                false,
                false,
            )?),
            CollectionKind::Map => {
                let key = collection.key.expect("map collections carry a key type");
                Some(Self::push_column(
                    table, "map_key", key, dialect, false, false, false,
                )?)
            }
            CollectionKind::Set => None,
        };

        let mut value_columns = vec![];
        match collection.element {
            ElementTy::Scalar(scalar) => {
                value_columns.push(Self::push_column(
                    table, "value", scalar, dialect, false, false, false,
                )?);
            }
            ElementTy::Model(target) => match domain.model(target).kind {
                ModelKind::ValueObject => {
                    Self::flatten_value_object(
                        domain,
                        dialect,
                        table,
                        target,
                        "",
                        false,
                        &mut value_columns,
                    )?;
                }
                // Cross-aggregate references are stored as plain identifier
                // values, inside collections as much as anywhere else
                ModelKind::AggregateRoot => {
                    value_columns.push(Self::push_column(
                        table,
                        "value",
                        ScalarType::Uuid,
                        dialect,
                        false,
                        false,
                        false,
                    )?);
                }
                ModelKind::Entity | ModelKind::Unknown => {
                    unreachable!("entity collections use the entity's own table")
                }
            },
        }

        let unique = match keyed {
            Some(key) => vec![parent, key],
            None => {
                let mut columns = vec![parent];
                columns.extend(value_columns);
                columns
            }
        };
        table.uniques.push(UniqueConstraint { columns: unique });

        Ok(())
    }

    /// Recursively flattens a value object's fields into columns.
    ///
    /// Column names are prefixed with the owning field path
    /// (`{prefix}_{field}`), so sibling fields of the same value-object type
    /// cannot silently overwrite each other; an actual collision is an
    /// error, never a shadowed column.
    fn flatten_value_object(
        domain: &domain::Schema,
        dialect: &Dialect,
        table: &mut db::Table,
        target: ModelId,
        prefix: &str,
        nullable: bool,
        columns: &mut Vec<ColumnId>,
    ) -> Result<()> {
        let model = domain.model(target);

        for field in &model.fields {
            let name = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{prefix}_{}", field.name)
            };

            match &field.ty {
                FieldTy::Scalar(scalar) => {
                    let column = Self::push_column(
                        table,
                        &name,
                        *scalar,
                        dialect,
                        nullable || field.nullable,
                        false,
                        false,
                    )?;
                    columns.push(column);
                }
                FieldTy::Reference(nested) => {
                    Self::flatten_value_object(
                        domain,
                        dialect,
                        table,
                        *nested,
                        &name,
                        nullable || field.nullable,
                        columns,
                    )?;
                }
                FieldTy::Collection(_) => {
                    unreachable!("analysis rejects collections in value objects")
                }
            }
        }

        Ok(())
    }

    fn push_column(
        table: &mut db::Table,
        name: &str,
        source: ScalarType,
        dialect: &Dialect,
        nullable: bool,
        primary_key: bool,
        foreign_key: bool,
    ) -> Result<ColumnId> {
        if table.column_by_name(name).is_some() {
            return Err(Error::column_collision(&table.name, name));
        }

        let id = ColumnId {
            table: table.id,
            index: table.columns.len(),
        };
        let ty = db::Type::from_scalar(source, &dialect.storage_types);

        table.columns.push(db::Column {
            id,
            name: name.to_owned(),
            ty,
            source,
            nullable,
            primary_key,
            foreign_key,
        });

        Ok(id)
    }
}
