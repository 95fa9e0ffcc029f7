mod builder;
pub use builder::Builder;

pub mod db;

pub mod domain;

pub mod mapping;
use mapping::Mapping;

mod name;
pub use name::Name;

pub mod relation;

mod verify;

mod warning;
pub use warning::Warning;

use db::{Table, TableId};
use domain::ModelId;

/// A fully derived schema: the ingested domain model, the relational tables
/// generated from it, and the mapping between the two.
#[derive(Debug)]
pub struct Schema {
    /// Domain-level schema
    pub domain: domain::Schema,

    /// Relational-level schema
    pub db: db::Schema,

    /// Maps the domain-level schema to the relational-level schema
    pub mapping: Mapping,

    /// Non-fatal findings surfaced during derivation, e.g. broken reference
    /// cycles
    pub warnings: Vec<Warning>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn mapping_for(&self, id: impl Into<ModelId>) -> &mapping::Model {
        self.mapping.model(id)
    }

    pub fn table_for(&self, id: impl Into<ModelId>) -> &Table {
        self.db.table(self.table_id_for(id))
    }

    pub fn table_id_for(&self, id: impl Into<ModelId>) -> TableId {
        self.mapping.model(id).table
    }
}
