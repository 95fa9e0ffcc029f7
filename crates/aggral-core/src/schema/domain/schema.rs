use super::classify::classify;
use super::{
    ClassDesc, Collection, CollectionKind, ElementTy, Field, FieldDesc, FieldId, FieldTy, Model,
    ModelId, ScalarType, TypeDesc,
};
use crate::schema::Name;
use crate::{Error, Result};
use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,
}

struct Builder {
    /// Class name to reserved model identifier. Identifiers are reserved
    /// before any field is resolved so classes may reference classes declared
    /// after them.
    by_name: IndexMap<String, ModelId>,
}

impl Schema {
    /// Ingests the front end's class descriptions: classifies every class,
    /// resolves field types, and analyzes collection shapes.
    pub fn from_classes(classes: &[ClassDesc]) -> Result<Self> {
        Builder::from_classes(classes)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Get a model by ID
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models
            .values()
            .find(|model| model.name.upper_camel_case() == name)
    }

    /// Get a field by ID
    pub fn field(&self, id: FieldId) -> &Field {
        self.model(id.model)
            .fields
            .get(id.index)
            .expect("invalid field ID")
    }

    pub fn aggregate_roots(&self) -> impl Iterator<Item = &Model> {
        self.models.values().filter(|model| model.is_aggregate_root())
    }
}

impl Builder {
    fn from_classes(classes: &[ClassDesc]) -> Result<Schema> {
        let mut builder = Builder {
            by_name: IndexMap::new(),
        };

        for (index, class) in classes.iter().enumerate() {
            if builder
                .by_name
                .insert(class.name.clone(), ModelId(index))
                .is_some()
            {
                return Err(Error::invalid_model(
                    &class.name,
                    "class declared more than once",
                ));
            }
        }

        let mut models = IndexMap::new();
        for (index, class) in classes.iter().enumerate() {
            let id = ModelId(index);
            models.insert(id, builder.build_model(id, class)?);
        }

        Ok(Schema { models })
    }

    fn build_model(&self, id: ModelId, class: &ClassDesc) -> Result<Model> {
        let mut fields = Vec::with_capacity(class.fields.len());

        for (index, field) in class.fields.iter().enumerate() {
            fields.push(self.build_field(id.field(index), class, field)?);
        }

        Ok(Model {
            id,
            name: Name::new(&class.name),
            kind: classify(class),
            fields,
        })
    }

    fn build_field(&self, id: FieldId, class: &ClassDesc, field: &FieldDesc) -> Result<Field> {
        let ty = match &field.ty {
            TypeDesc::Named(name) => self.resolve_named(class, field, name)?,
            _ => FieldTy::Collection(self.build_collection(class, field)?),
        };

        Ok(Field {
            id,
            name: field.name.clone(),
            ty,
            nullable: field.nullable,
        })
    }

    fn resolve_named(&self, class: &ClassDesc, field: &FieldDesc, name: &str) -> Result<FieldTy> {
        if let Some(scalar) = ScalarType::parse(name) {
            return Ok(FieldTy::Scalar(scalar));
        }

        match self.by_name.get(name) {
            Some(&target) => Ok(FieldTy::Reference(target)),
            None => Err(Error::unsupported_field_type(
                &class.name,
                &field.name,
                name,
            )),
        }
    }

    fn build_collection(&self, class: &ClassDesc, field: &FieldDesc) -> Result<Collection> {
        let kind = CollectionKind::of(&field.ty).expect("caller matched a collection constructor");

        match kind {
            CollectionKind::List | CollectionKind::Set => {
                let element = field.ty.element().expect("lists and sets have an element");
                let element = self.resolve_element(class, field, element)?;

                Ok(Collection {
                    kind,
                    key: None,
                    element,
                })
            }
            CollectionKind::Map => {
                let (key, value) = field.ty.map_types().expect("maps have key and value");

                // Map keys must be scalar; a class-keyed map has no relational shape
                let key = match key {
                    TypeDesc::Named(name) => ScalarType::parse(name),
                    _ => None,
                };
                let Some(key) = key else {
                    return Err(Error::unsupported_field_type(
                        &class.name,
                        &field.name,
                        field.ty.to_string(),
                    ));
                };

                let element = self.resolve_element(class, field, value)?;

                Ok(Collection {
                    kind,
                    key: Some(key),
                    element,
                })
            }
        }
    }

    fn resolve_element(
        &self,
        class: &ClassDesc,
        field: &FieldDesc,
        desc: &TypeDesc,
    ) -> Result<ElementTy> {
        // Nested collections cannot be normalized into a single table shape
        let TypeDesc::Named(name) = desc else {
            return Err(Error::unsupported_field_type(
                &class.name,
                &field.name,
                field.ty.to_string(),
            ));
        };

        if let Some(scalar) = ScalarType::parse(name) {
            return Ok(ElementTy::Scalar(scalar));
        }

        match self.by_name.get(name) {
            Some(&target) => Ok(ElementTy::Model(target)),
            None => Err(Error::unsupported_field_type(
                &class.name,
                &field.name,
                field.ty.to_string(),
            )),
        }
    }
}
