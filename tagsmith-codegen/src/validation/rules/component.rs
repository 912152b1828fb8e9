use eyre::Result;
use tagsmith_core::{ElementKind, MarkerKind, ResourceType};

use crate::{
    markers::ENHANCED_COMPONENT,
    validation::{Checks, Validator},
};

/// Checks `@enhanced-component` classes.
pub struct EnhancedComponentValidator;

impl Validator for EnhancedComponentValidator {
    fn kind(&self) -> MarkerKind {
        ENHANCED_COMPONENT
    }

    fn description(&self) -> &'static str {
        "Component classes must be subclassable and registered"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !checks.element_kind(&[ElementKind::Class]) {
            return Ok(());
        }
        checks.not_final();
        checks.not_private();
        checks.not_abstract();

        let qualified = checks.declaration().qualified_name();
        if !checks.context().project.is_registered(&qualified) {
            checks.error(format!(
                "{} is not registered in [project].components",
                qualified
            ));
        }

        if let Some(layout) = checks.optional_str("layout") {
            checks.resource(ResourceType::Layout, layout);
        }
        Ok(())
    }
}
