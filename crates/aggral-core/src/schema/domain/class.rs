use std::fmt;

/// One domain class as reported by the static-analysis front end.
///
/// This is the boundary with the excluded front end: classification and type
/// resolution happen during ingestion, nothing here is resolved yet.
#[derive(Debug, Clone)]
pub struct ClassDesc {
    /// Class name
    pub name: String,

    /// Superclass chain, nearest first, up to the hierarchy root
    pub superclasses: Vec<String>,

    /// Declared fields
    pub fields: Vec<FieldDesc>,
}

#[derive(Debug, Clone)]
pub struct FieldDesc {
    pub name: String,

    /// Declared type, unresolved
    pub ty: TypeDesc,

    pub nullable: bool,
}

/// A declared field type before resolution against the schema.
#[derive(Debug, Clone)]
pub enum TypeDesc {
    /// A scalar or domain class name
    Named(String),
    List(Box<TypeDesc>),
    Set(Box<TypeDesc>),
    Map(Box<TypeDesc>, Box<TypeDesc>),
}

impl TypeDesc {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn list(element: TypeDesc) -> Self {
        Self::List(Box::new(element))
    }

    pub fn set(element: TypeDesc) -> Self {
        Self::Set(Box::new(element))
    }

    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Structural collection detection: only the declared constructor
    /// matters, never what the element type is.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_) | Self::Map(..))
    }

    /// Element type for lists and sets.
    pub fn element(&self) -> Option<&TypeDesc> {
        match self {
            Self::List(element) | Self::Set(element) => Some(element),
            _ => None,
        }
    }

    /// Key and value types for maps.
    pub fn map_types(&self) -> Option<(&TypeDesc, &TypeDesc)> {
        match self {
            Self::Map(key, value) => Some((key, value)),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(element) => write!(f, "List<{element}>"),
            Self::Set(element) => write!(f, "Set<{element}>"),
            Self::Map(key, value) => write!(f, "Map<{key}, {value}>"),
        }
    }
}
