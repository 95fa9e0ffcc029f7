use std::fmt;

/// Non-fatal findings produced during schema derivation.
///
/// The core is pure and does no logging; callers decide how to report these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A reference cycle was broken during traversal. Table ordering among
    /// the cycle's members is best-effort rather than a strict topological
    /// order.
    CyclicReference { from: String, to: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::CyclicReference { from, to } => write!(
                f,
                "cyclic reference `{from}` -> `{to}`; table ordering within the cycle is best-effort"
            ),
        }
    }
}
