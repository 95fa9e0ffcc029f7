mod class;
pub use class::{ClassDesc, FieldDesc, TypeDesc};

mod classify;

mod collection;
pub use collection::{Collection, CollectionKind, ElementTy};

mod field;
pub use field::{Field, FieldId, FieldTy};

mod model;
pub use model::{Model, ModelId, ModelKind};

mod scalar;
pub use scalar::ScalarType;

mod schema;
pub use schema::Schema;
