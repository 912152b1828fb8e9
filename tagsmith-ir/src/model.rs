//! The generation model.

use indexmap::IndexMap;
use serde::Serialize;
use tagsmith_core::simple_name;

use crate::{
    members::{ConstructorSpec, FieldSpec, MethodSpec},
    types::TypeRef,
};

/// Everything one run generates, keyed by qualified generated type name.
///
/// Processors mutate the model in registration order; renderers receive it
/// by shared reference once processing has finished.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationModel {
    types: IndexMap<String, GeneratedType>,
}

impl GenerationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the generated type with this qualified name, creating it with
    /// `init` on first use.
    pub fn get_or_insert(
        &mut self,
        name: &str,
        init: impl FnOnce() -> GeneratedType,
    ) -> &mut GeneratedType {
        self.types.entry(name.to_string()).or_insert_with(init)
    }

    /// Insert a generated type, replacing any previous type of the same name.
    pub fn insert(&mut self, ty: GeneratedType) {
        self.types.insert(ty.name.clone(), ty);
    }

    pub fn get(&self, name: &str) -> Option<&GeneratedType> {
        self.types.get(name)
    }

    pub fn type_mut(&mut self, name: &str) -> Option<&mut GeneratedType> {
        self.types.get_mut(name)
    }

    /// Generated types in creation order.
    pub fn types(&self) -> impl Iterator<Item = &GeneratedType> {
        self.types.values()
    }

    /// Number of artifacts a renderer will emit (one per generated type).
    pub fn count_artifacts(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// One generated type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedType {
    /// Qualified name of the generated type.
    pub name: String,
    /// Qualified name of the host type it was derived from.
    pub origin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<TypeRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<TypeRef>,
    pub is_final: bool,
    pub fields: Vec<FieldSpec>,
    pub constructors: Vec<ConstructorSpec>,
    pub methods: Vec<MethodSpec>,
}

impl GeneratedType {
    /// Create an empty generated type.
    pub fn new(name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            extends: None,
            implements: Vec::new(),
            is_final: false,
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Set the supertype.
    pub fn extends(mut self, ty: TypeRef) -> Self {
        self.extends = Some(ty);
        self
    }

    /// Add an implemented interface.
    pub fn implements(mut self, ty: TypeRef) -> Self {
        self.implements.push(ty);
        self
    }

    /// Mark as final.
    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Simple name of the generated type.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Add a field unless one with the same name exists.
    pub fn add_field(&mut self, field: FieldSpec) {
        if !self.has_field(&field.name) {
            self.fields.push(field);
        }
    }

    pub fn method_mut(&mut self, name: &str) -> Option<&mut MethodSpec> {
        self.methods.iter_mut().find(|m| m.name == name)
    }

    /// Get the method with this name, creating it with `init` on first use.
    pub fn ensure_method(
        &mut self,
        name: &str,
        init: impl FnOnce() -> MethodSpec,
    ) -> &mut MethodSpec {
        let index = match self.methods.iter().position(|m| m.name == name) {
            Some(index) => index,
            None => {
                self.methods.push(init());
                self.methods.len() - 1
            }
        };
        &mut self.methods[index]
    }

    /// Fields, constructors and methods combined.
    pub fn member_count(&self) -> usize {
        self.fields.len() + self.constructors.len() + self.methods.len()
    }
}
