use std::sync::Arc;

/// An error raised while deriving a relational schema from a domain model.
///
/// Schema derivation is a build-time step; every error points back at the
/// offending class (and field, where there is one) so the developer can fix
/// their model. There is no runtime recovery path.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),

    /// A class cannot participate in schema derivation as declared.
    InvalidModel { class: String, message: String },

    /// A field's declared type resolves to neither a scalar, a known domain
    /// class, nor a supported collection shape.
    UnsupportedFieldType {
        class: String,
        field: String,
        ty: String,
    },

    /// Two flattened fields produced the same column name.
    ColumnCollision { table: String, column: String },

    /// Two models produced the same table name.
    TableCollision { table: String },

    /// The generated schema violated a structural invariant.
    InvalidSchema(String),
}

impl Error {
    pub fn invalid_model(class: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorKind::InvalidModel {
            class: class.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn unsupported_field_type(
        class: impl Into<String>,
        field: impl Into<String>,
        ty: impl Into<String>,
    ) -> Self {
        ErrorKind::UnsupportedFieldType {
            class: class.into(),
            field: field.into(),
            ty: ty.into(),
        }
        .into()
    }

    pub fn column_collision(table: impl Into<String>, column: impl Into<String>) -> Self {
        ErrorKind::ColumnCollision {
            table: table.into(),
            column: column.into(),
        }
        .into()
    }

    pub fn table_collision(table: impl Into<String>) -> Self {
        ErrorKind::TableCollision {
            table: table.into(),
        }
        .into()
    }

    pub fn invalid_schema(message: impl Into<String>) -> Self {
        ErrorKind::InvalidSchema(message.into()).into()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.inner {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&*self.inner, f)
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", &self.inner).finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            InvalidModel { class, message } => {
                write!(f, "invalid model `{class}`: {message}")
            }
            UnsupportedFieldType { class, field, ty } => {
                write!(f, "unsupported field type `{ty}` for `{class}::{field}`")
            }
            ColumnCollision { table, column } => {
                write!(f, "duplicate column `{column}` on table `{table}`")
            }
            TableCollision { table } => write!(f, "duplicate table name `{table}`"),
            InvalidSchema(message) => write!(f, "invalid schema: {message}"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}
