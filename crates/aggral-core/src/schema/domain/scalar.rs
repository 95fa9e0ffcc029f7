/// The closed set of scalar domain types recognized by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int,
    Double,
    Bool,
    DateTime,
    Uuid,
}

impl ScalarType {
    /// Parses a scalar type from its source-model name.
    ///
    /// Returns `None` for any name outside the closed scalar set so callers
    /// can fail fast with the owning class and field instead of emitting a
    /// malformed schema.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "String" => Some(Self::String),
            "int" => Some(Self::Int),
            "double" => Some(Self::Double),
            "bool" => Some(Self::Bool),
            "DateTime" => Some(Self::DateTime),
            "UuidValue" => Some(Self::Uuid),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_scalar_set() {
        assert_eq!(ScalarType::parse("String"), Some(ScalarType::String));
        assert_eq!(ScalarType::parse("UuidValue"), Some(ScalarType::Uuid));
        assert_eq!(ScalarType::parse("Money"), None);
        assert_eq!(ScalarType::parse("string"), None);
    }
}
