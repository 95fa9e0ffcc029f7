use crate::schema::db;

/// SQL-engine specific structural knowledge consumed by the schema builder.
///
/// The builder is dialect-parametric: it asks the dialect for storage types
/// and emits a dialect-agnostic structural description. Rendering that
/// description into engine-specific DDL text is the renderer's concern, not
/// this crate's.
#[derive(Debug)]
pub struct Dialect {
    /// Column storage types native to the database
    pub storage_types: StorageTypes,
}

#[derive(Debug)]
pub struct StorageTypes {
    /// The default storage type for a string.
    pub default_string_type: db::Type,

    /// Native representation for identifier (UUID) values.
    pub default_uuid_type: db::Type,

    /// Native representation for an instant in time.
    pub default_timestamp_type: db::Type,

    /// Native representation for booleans.
    pub default_boolean_type: db::Type,
}

impl Dialect {
    /// SQLite dialect.
    pub const SQLITE: Self = Self {
        storage_types: StorageTypes::SQLITE,
    };

    /// PostgreSQL dialect
    pub const POSTGRESQL: Self = Self {
        storage_types: StorageTypes::POSTGRESQL,
    };

    /// MySQL dialect
    pub const MYSQL: Self = Self {
        storage_types: StorageTypes::MYSQL,
    };
}

impl StorageTypes {
    /// SQLite storage types
    pub const SQLITE: StorageTypes = StorageTypes {
        default_string_type: db::Type::Text,

        // SQLite has no native UUID type; identifiers are stored as their
        // canonical text form.
        default_uuid_type: db::Type::Text,

        // Stored as epoch milliseconds; SQLite has no native timestamp type.
        default_timestamp_type: db::Type::Integer(8),

        default_boolean_type: db::Type::Integer(1),
    };

    pub const POSTGRESQL: StorageTypes = StorageTypes {
        default_string_type: db::Type::Text,
        default_uuid_type: db::Type::Uuid,
        default_timestamp_type: db::Type::Timestamp(6),
        default_boolean_type: db::Type::Boolean,
    };

    pub const MYSQL: StorageTypes = StorageTypes {
        // Keeps indexed columns under the 767-byte InnoDB key limit with
        // utf8mb4.
        default_string_type: db::Type::VarChar(191),
        default_uuid_type: db::Type::Binary(16),
        default_timestamp_type: db::Type::DateTime(6),
        default_boolean_type: db::Type::Boolean,
    };
}
