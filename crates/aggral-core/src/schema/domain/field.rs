use super::{Collection, ModelId, ScalarType};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The field name as declared in the source model
    pub name: String,

    /// Scalar, reference, or collection
    pub ty: FieldTy,

    /// True if the column(s) backing this field accept NULL
    pub nullable: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub enum FieldTy {
    /// A recognized scalar domain type
    Scalar(ScalarType),

    /// A reference to another domain class
    Reference(ModelId),

    /// A List, Set, or Map over scalars or domain classes
    Collection(Collection),
}

impl FieldTy {
    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            Self::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

impl From<&Field> for FieldId {
    fn from(val: &Field) -> Self {
        val.id
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
