mod table;

use super::{db, domain, mapping::Mapping, relation, Schema, Warning};
use crate::dialect::Dialect;
use crate::{Error, Result};
use indexmap::IndexMap;

/// Derives the relational schema for one aggregate.
#[derive(Debug)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    /// Build options
    builder: &'a Builder,

    domain: &'a domain::Schema,

    dialect: &'a Dialect,

    /// The analyzed aggregate being built
    analysis: &'a relation::Analysis,

    /// Maps table names to identifiers. Names are reserved before the table
    /// objects are populated.
    table_lookup: IndexMap<String, db::TableId>,

    /// Tables as they are built, in FK-safe creation order
    tables: Vec<db::Table>,

    /// Junction table reserved per collection field that needs one
    junction_tables: IndexMap<domain::FieldId, db::TableId>,

    /// Domain-level to relational-level schema mapping
    mapping: Mapping,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            table_name_prefix: None,
        }
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Runs the full derivation for the aggregate rooted at `root`.
    pub fn build(
        &self,
        domain: domain::Schema,
        root: impl Into<domain::ModelId>,
        dialect: &Dialect,
    ) -> Result<Schema> {
        let analysis = relation::analyze(&domain, root)?;

        let mut build = BuildSchema {
            builder: self,
            domain: &domain,
            dialect,
            analysis: &analysis,
            table_lookup: IndexMap::new(),
            tables: vec![],
            junction_tables: IndexMap::new(),
            mapping: Mapping::default(),
        };

        // Reserve every table name and identifier first, then populate. Child
        // tables must be able to point at their parent's identifier, and
        // parents at their children's tables, regardless of emission order.
        build.reserve_tables()?;
        build.populate_tables()?;

        let BuildSchema {
            tables, mapping, ..
        } = build;

        let warnings = analysis
            .back_edges
            .iter()
            .map(|&(from, to)| Warning::CyclicReference {
                from: domain.model(from).name.upper_camel_case(),
                to: domain.model(to).name.upper_camel_case(),
            })
            .collect();

        let schema = Schema {
            domain,
            db: db::Schema { tables },
            mapping,
            warnings,
        };

        // Verify the schema structure
        schema.verify()?;

        Ok(schema)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildSchema<'_> {
    fn register_table(&mut self, name: impl AsRef<str>) -> Result<db::TableId> {
        if self.table_lookup.contains_key(name.as_ref()) {
            return Err(Error::table_collision(name.as_ref()));
        }

        let id = db::TableId(self.table_lookup.len());
        self.table_lookup.insert(name.as_ref().to_string(), id);
        Ok(id)
    }

    fn table_name_for_model(&self, model: &domain::Model) -> String {
        self.prefix_table_name(&model.name.table_case())
    }

    fn prefix_table_name(&self, name: &str) -> String {
        if let Some(prefix) = &self.builder.table_name_prefix {
            format!("{prefix}{name}")
        } else {
            name.to_string()
        }
    }
}
