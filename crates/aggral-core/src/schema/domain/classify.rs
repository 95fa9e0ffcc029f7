use super::{ClassDesc, ModelKind};

/// Marker base classes recognized on a superclass chain.
const AGGREGATE_ROOT: &str = "AggregateRoot";
const ENTITY: &str = "Entity";
const VALUE: &str = "Value";

/// Classifies a class by walking its superclass chain, nearest first.
///
/// `AggregateRoot` is itself a specialization of `Entity`, so the nearest
/// marker wins. A chain matching no marker yields [`ModelKind::Unknown`],
/// which the analyzer rejects when the class is reachable from an aggregate
/// rather than silently skipping it.
pub(super) fn classify(class: &ClassDesc) -> ModelKind {
    for superclass in &class.superclasses {
        match superclass.as_str() {
            AGGREGATE_ROOT => return ModelKind::AggregateRoot,
            ENTITY => return ModelKind::Entity,
            VALUE => return ModelKind::ValueObject,
            _ => {}
        }
    }

    ModelKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, superclasses: &[&str]) -> ClassDesc {
        ClassDesc {
            name: name.to_string(),
            superclasses: superclasses.iter().map(|s| s.to_string()).collect(),
            fields: vec![],
        }
    }

    #[test]
    fn direct_markers() {
        assert_eq!(
            classify(&class("Order", &["AggregateRoot"])),
            ModelKind::AggregateRoot
        );
        assert_eq!(
            classify(&class("OrderItem", &["Entity"])),
            ModelKind::Entity
        );
        assert_eq!(
            classify(&class("Money", &["Value"])),
            ModelKind::ValueObject
        );
    }

    #[test]
    fn transitive_chain() {
        // User-defined intermediate base classes are walked through
        assert_eq!(
            classify(&class("Invoice", &["BillingDocument", "AggregateRoot", "Entity"])),
            ModelKind::AggregateRoot
        );
    }

    #[test]
    fn nearest_marker_wins() {
        // AggregateRoot extends Entity; the chain reports both
        assert_eq!(
            classify(&class("Order", &["AggregateRoot", "Entity"])),
            ModelKind::AggregateRoot
        );
    }

    #[test]
    fn unmatched_chain_is_unknown() {
        assert_eq!(classify(&class("Helper", &["Object"])), ModelKind::Unknown);
        assert_eq!(classify(&class("Helper", &[])), ModelKind::Unknown);
    }
}
