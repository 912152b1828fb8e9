use eyre::Result;
use tagsmith_core::{ElementKind, MarkerKind, ResourceType};

use super::component_member;
use crate::{
    markers::{ANY_ITEM, ListenerKind, type_matches},
    validation::{Checks, Validator},
};

/// Checks view listener methods for one [`ListenerKind`].
pub struct ListenerValidator(pub ListenerKind);

impl ListenerValidator {
    fn check_shape(&self, checks: &mut Checks<'_>) {
        let params: Vec<&str> = checks
            .element()
            .params
            .iter()
            .map(|p| p.ty.as_str())
            .collect();

        let shapes = self.0.handler_shapes();
        let matches = shapes.iter().any(|shape| {
            shape.len() == params.len()
                && shape
                    .iter()
                    .zip(&params)
                    .all(|(expected, actual)| *expected == ANY_ITEM || type_matches(actual, expected))
        });

        if !matches {
            let allowed: Vec<String> = shapes
                .iter()
                .map(|shape| {
                    let names: Vec<&str> = shape
                        .iter()
                        .map(|ty| if *ty == ANY_ITEM { "item" } else { *ty })
                        .collect();
                    format!("({})", names.join(", "))
                })
                .collect();
            checks.error(format!(
                "{} method parameters must be one of {}, found ({})",
                self.0.marker(),
                allowed.join(" or "),
                params.join(", ")
            ));
        }
    }

    fn check_return(&self, checks: &mut Checks<'_>) {
        let element = checks.element();
        if element.returns_void() {
            return;
        }
        let ty = element.ty.as_deref().unwrap_or_default();
        if self.0.returns_boolean() && type_matches(ty, "boolean") {
            return;
        }

        let expected = if self.0.returns_boolean() {
            "void or boolean"
        } else {
            "void"
        };
        checks.error(format!(
            "{} method must return {}, found {}",
            self.0.marker(),
            expected,
            ty
        ));
    }
}

impl Validator for ListenerValidator {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Listener methods must match the callback signature and name known view ids"
    }

    fn requires_catalog(&self) -> bool {
        true
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Method) {
            return Ok(());
        }
        self.check_shape(checks);
        self.check_return(checks);

        let ids = match checks.declaration().arg("ids") {
            None => Some(vec![self.0.default_id(&checks.element().name)]),
            Some(_) => checks.optional_str_list("ids"),
        };
        for id in ids.unwrap_or_default() {
            checks.resource(ResourceType::Id, id);
        }
        Ok(())
    }
}
