use crate::dialect::StorageTypes;
use crate::schema::domain::ScalarType;

/// Database-level storage types: what appears in `CREATE TABLE` statements.
///
/// This is the structural description only; rendering a variant into
/// engine-specific DDL text belongs to the downstream DDL renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A boolean value
    Boolean,

    /// A signed integer of `n` bytes
    Integer(u8),

    /// 8-byte IEEE 754 floating point
    Double,

    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u64),

    /// 128-bit universally unique identifier (UUID)
    Uuid,

    /// Fixed-size binary type of `n` bytes
    Binary(u8),

    /// An instant in time with fractional seconds precision (0-9 digits)
    Timestamp(u8),

    /// A civil datetime with fractional seconds precision (0-9 digits)
    DateTime(u8),
}

impl Type {
    /// Maps a scalar domain type to the dialect's storage type.
    ///
    /// Total over the closed [`ScalarType`] set; unrecognized scalar names
    /// never reach this point because ingestion rejects them with the owning
    /// class and field.
    pub fn from_scalar(scalar: ScalarType, storage: &StorageTypes) -> Type {
        match scalar {
            ScalarType::String => storage.default_string_type.clone(),
            ScalarType::Int => Type::Integer(8),
            ScalarType::Double => Type::Double,
            ScalarType::Bool => storage.default_boolean_type.clone(),
            ScalarType::DateTime => storage.default_timestamp_type.clone(),
            ScalarType::Uuid => storage.default_uuid_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    #[test]
    fn identifier_mapping_per_dialect() {
        let scalar = ScalarType::Uuid;
        assert_eq!(
            Type::from_scalar(scalar, &Dialect::SQLITE.storage_types),
            Type::Text
        );
        assert_eq!(
            Type::from_scalar(scalar, &Dialect::POSTGRESQL.storage_types),
            Type::Uuid
        );
        assert_eq!(
            Type::from_scalar(scalar, &Dialect::MYSQL.storage_types),
            Type::Binary(16)
        );
    }

    #[test]
    fn timestamp_mapping_per_dialect() {
        let scalar = ScalarType::DateTime;
        // SQLite stores instants as epoch integers
        assert_eq!(
            Type::from_scalar(scalar, &Dialect::SQLITE.storage_types),
            Type::Integer(8)
        );
        assert_eq!(
            Type::from_scalar(scalar, &Dialect::POSTGRESQL.storage_types),
            Type::Timestamp(6)
        );
        assert_eq!(
            Type::from_scalar(scalar, &Dialect::MYSQL.storage_types),
            Type::DateTime(6)
        );
    }

    #[test]
    fn integers_are_eight_bytes_everywhere() {
        for storage in [
            &Dialect::SQLITE.storage_types,
            &Dialect::POSTGRESQL.storage_types,
            &Dialect::MYSQL.storage_types,
        ] {
            assert_eq!(Type::from_scalar(ScalarType::Int, storage), Type::Integer(8));
        }
    }
}
