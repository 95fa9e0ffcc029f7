use super::{ModelId, ScalarType, TypeDesc};

/// A field's collection shape after structural analysis of its declared type.
#[derive(Debug, Clone)]
pub struct Collection {
    pub kind: CollectionKind,

    /// Key type; present only for maps
    pub key: Option<ScalarType>,

    pub element: ElementTy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    List,
    Set,
    Map,
}

/// What a collection holds. Whether a `Model` element embeds (value object)
/// or gets its own table (entity) is read off the target model's cached kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTy {
    Scalar(ScalarType),
    Model(ModelId),
}

impl CollectionKind {
    /// Collection detection is purely structural: the declared constructor
    /// decides, independent of the element type.
    pub fn of(ty: &TypeDesc) -> Option<CollectionKind> {
        match ty {
            TypeDesc::List(_) => Some(CollectionKind::List),
            TypeDesc::Set(_) => Some(CollectionKind::Set),
            TypeDesc::Map(..) => Some(CollectionKind::Map),
            TypeDesc::Named(_) => None,
        }
    }
}

impl ElementTy {
    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            Self::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<ModelId> {
        match self {
            Self::Model(model) => Some(*model),
            _ => None,
        }
    }
}
