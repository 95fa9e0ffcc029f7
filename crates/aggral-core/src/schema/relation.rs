use super::domain::{
    CollectionKind, ElementTy, Field, FieldId, FieldTy, Model, ModelId, ModelKind, ScalarType,
    Schema,
};
use crate::{Error, Result};
use indexmap::{IndexMap, IndexSet};

/// Structural classification of how one field lands in the relational
/// schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Plain scalar column on the owning table
    Scalar,

    /// Value object flattened into the owning table
    Embedded(ModelId),

    /// Singular nested entity; the child's own table carries the foreign key
    /// back to this model's table
    Child(ModelId),

    /// Reference to another aggregate root: a plain identifier column, never
    /// a foreign key, preserving the aggregate transaction boundary
    AggregateRef(ModelId),

    /// Normalized out into a separate table keyed by the parent's identifier
    CollectionTable,
}

/// Cardinality of a field, derived purely from its declared shape. The
/// inverse (many-to-one) side is not derived; labeling it is left to the
/// front end's annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
}

/// How an owned entity is attached to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    pub parent: ModelId,
    pub field: FieldId,
    pub link: OwnershipLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipLink {
    /// Singular nested entity; one row per parent
    Singular,

    /// Ordered entity collection; the entity's table gains a `position`
    /// column
    List,

    Set,

    /// Keyed entity collection; the entity's table gains a `map_key` column
    /// of the given scalar type
    Map(ScalarType),
}

/// Result of one traversal from an aggregate root.
#[derive(Debug)]
pub struct Analysis {
    /// Reachable models in dependency order: every model's referenced,
    /// non-scalar types appear strictly before it (post-order DFS). Value
    /// objects participate in the ordering even though they never produce
    /// tables.
    pub order: Vec<ModelId>,

    /// Structural classification per reachable field
    pub relations: IndexMap<FieldId, Relation>,

    /// Owner link per owned entity
    pub owners: IndexMap<ModelId, Ownership>,

    /// Edges into a model that was still on the traversal stack. Cycles are
    /// tolerated, not errors, but ordering among a cycle's members is not
    /// strict.
    pub back_edges: Vec<(ModelId, ModelId)>,
}

/// Walks the type graph reachable from `root`, producing a dependency
/// ordering plus a per-field relationship classification.
///
/// The traversal is an explicit worklist DFS, so graph depth never threatens
/// the call stack. `visiting` holds the models on the conceptual recursion
/// stack; an edge into a `visiting` model is a back-edge and is recorded
/// rather than followed.
pub fn analyze(schema: &Schema, root: impl Into<ModelId>) -> Result<Analysis> {
    Analyze {
        schema,
        discovered: IndexSet::new(),
        visiting: IndexSet::new(),
        stack: vec![],
        analysis: Analysis {
            order: vec![],
            relations: IndexMap::new(),
            owners: IndexMap::new(),
            back_edges: vec![],
        },
    }
    .run(root.into())
}

/// Cardinality from declared shape alone: collection fields are one-to-many,
/// everything else is one-to-one.
pub fn relationship_type(field: &Field) -> RelationshipType {
    match &field.ty {
        FieldTy::Collection(_) => RelationshipType::OneToMany,
        _ => RelationshipType::OneToOne,
    }
}

struct Frame {
    model: ModelId,
    /// Referenced models still to visit
    targets: Vec<ModelId>,
    next: usize,
}

struct Analyze<'a> {
    schema: &'a Schema,
    discovered: IndexSet<ModelId>,
    visiting: IndexSet<ModelId>,
    stack: Vec<Frame>,
    analysis: Analysis,
}

impl Analyze<'_> {
    fn run(mut self, root: ModelId) -> Result<Analysis> {
        let model = self.schema.model(root);
        if !model.is_aggregate_root() {
            return Err(Error::invalid_model(
                model.name.upper_camel_case(),
                "analysis must start at an aggregate root",
            ));
        }

        self.push_frame(root)?;

        loop {
            let (model, target) = {
                let Some(frame) = self.stack.last_mut() else {
                    break;
                };

                if frame.next < frame.targets.len() {
                    let target = frame.targets[frame.next];
                    frame.next += 1;
                    (frame.model, Some(target))
                } else {
                    (frame.model, None)
                }
            };

            match target {
                Some(target) if self.discovered.contains(&target) => {}
                Some(target) if self.visiting.contains(&target) => {
                    // A back-edge into a value object cannot be tolerated:
                    // flattening an embedding cycle would never terminate
                    let target_model = self.schema.model(target);
                    if target_model.is_value_object() {
                        return Err(Error::invalid_model(
                            target_model.name.upper_camel_case(),
                            "value object cycle cannot be flattened",
                        ));
                    }

                    // Entity back-edge: break the cycle here and report it
                    // instead of re-entering the model
                    self.analysis.back_edges.push((model, target));
                }
                Some(target) => self.push_frame(target)?,
                None => {
                    self.stack.pop();
                    self.visiting.shift_remove(&model);
                    self.discovered.insert(model);
                    self.analysis.order.push(model);
                }
            }
        }

        Ok(self.analysis)
    }

    fn push_frame(&mut self, model_id: ModelId) -> Result<()> {
        let model = self.schema.model(model_id);

        if let ModelKind::Unknown = model.kind {
            return Err(self.unclassifiable(model_id));
        }

        let targets = if model.is_value_object() {
            self.classify_value_object(model)?
        } else {
            self.classify_entity(model)?
        };

        self.visiting.insert(model_id);
        self.stack.push(Frame {
            model: model_id,
            targets,
            next: 0,
        });

        Ok(())
    }

    /// Value objects may only hold scalars and nested value objects; they
    /// have no identity to hang a child table or junction table off of.
    fn classify_value_object(&mut self, model: &Model) -> Result<Vec<ModelId>> {
        let mut targets = vec![];

        for field in &model.fields {
            match &field.ty {
                FieldTy::Scalar(_) => {
                    self.analysis.relations.insert(field.id, Relation::Scalar);
                }
                FieldTy::Reference(target)
                    if self.schema.model(*target).is_value_object() =>
                {
                    self.analysis
                        .relations
                        .insert(field.id, Relation::Embedded(*target));
                    targets.push(*target);
                }
                _ => {
                    return Err(Error::invalid_model(
                        model.name.upper_camel_case(),
                        format!(
                            "value object field `{}` must be a scalar or another value object",
                            field.name
                        ),
                    ));
                }
            }
        }

        Ok(targets)
    }

    fn classify_entity(&mut self, model: &Model) -> Result<Vec<ModelId>> {
        let mut targets = vec![];

        for field in &model.fields {
            match &field.ty {
                FieldTy::Scalar(_) => {
                    self.analysis.relations.insert(field.id, Relation::Scalar);
                }
                FieldTy::Reference(target) => {
                    let target = *target;
                    match self.schema.model(target).kind {
                        ModelKind::ValueObject => {
                            self.analysis
                                .relations
                                .insert(field.id, Relation::Embedded(target));
                            targets.push(target);
                        }
                        ModelKind::AggregateRoot => {
                            // Aggregate boundary: identifier column only; the
                            // other aggregate is a separate derivation and is
                            // not traversed
                            self.analysis
                                .relations
                                .insert(field.id, Relation::AggregateRef(target));
                        }
                        ModelKind::Entity => {
                            self.analysis
                                .relations
                                .insert(field.id, Relation::Child(target));
                            self.claim(target, model.id, field.id, OwnershipLink::Singular);
                            targets.push(target);
                        }
                        ModelKind::Unknown => return Err(self.unclassifiable(target)),
                    }
                }
                FieldTy::Collection(collection) => {
                    self.analysis
                        .relations
                        .insert(field.id, Relation::CollectionTable);

                    match collection.element {
                        ElementTy::Scalar(_) => {}
                        ElementTy::Model(target) => match self.schema.model(target).kind {
                            ModelKind::ValueObject => targets.push(target),
                            // Stored as plain identifier values, not traversed
                            ModelKind::AggregateRoot => {}
                            ModelKind::Entity => {
                                let link = match collection.kind {
                                    CollectionKind::List => OwnershipLink::List,
                                    CollectionKind::Set => OwnershipLink::Set,
                                    CollectionKind::Map => OwnershipLink::Map(
                                        collection.key.expect("map collections carry a key type"),
                                    ),
                                };
                                self.claim(target, model.id, field.id, link);
                                targets.push(target);
                            }
                            ModelKind::Unknown => return Err(self.unclassifiable(target)),
                        },
                    }
                }
            }
        }

        Ok(targets)
    }

    /// First owner wins. An entity referenced from a second path keeps the
    /// foreign key to its original owner; cycles depend on this not being an
    /// error.
    fn claim(&mut self, target: ModelId, parent: ModelId, field: FieldId, link: OwnershipLink) {
        self.analysis
            .owners
            .entry(target)
            .or_insert(Ownership {
                parent,
                field,
                link,
            });
    }

    fn unclassifiable(&self, target: ModelId) -> Error {
        Error::invalid_model(
            self.schema.model(target).name.upper_camel_case(),
            "class extends none of `AggregateRoot`, `Entity`, or `Value`",
        )
    }
}
