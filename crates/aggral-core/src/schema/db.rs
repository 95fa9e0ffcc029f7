mod column;
pub use column::{Column, ColumnId};

mod fk;
pub use fk::{CascadeAction, ForeignKey};

mod schema;
pub use schema::Schema;

mod table;
pub use table::{Table, TableId, UniqueConstraint};

mod ty;
pub use ty::Type;
