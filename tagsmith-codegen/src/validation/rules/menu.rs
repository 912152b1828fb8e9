use eyre::Result;
use tagsmith_core::{ElementKind, MarkerKind, ResourceType};

use super::component_member;
use crate::{
    markers::{ENHANCED_COMPONENT, OPTIONS_ITEM, OPTIONS_MENU, type_matches},
    validation::{Checks, Validator},
};

const MENU_ITEM: &str = "android.view.MenuItem";

/// Default item id for a handler method (`saveSelected` -> `save`).
pub(crate) fn default_item_id(method: &str) -> &str {
    match method.strip_suffix("Selected") {
        Some(id) if !id.is_empty() => id,
        _ => method,
    }
}

/// Checks `@options-menu` classes.
pub struct OptionsMenuValidator;

impl Validator for OptionsMenuValidator {
    fn kind(&self) -> MarkerKind {
        OPTIONS_MENU
    }

    fn description(&self) -> &'static str {
        "Options menus belong to a component and name a known menu resource"
    }

    fn requires_catalog(&self) -> bool {
        true
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !checks.element_kind(&[ElementKind::Class]) {
            return Ok(());
        }
        checks.also_marked(&ENHANCED_COMPONENT);

        if checks.declaration().arg("menu").is_none() {
            checks.error(format!("{} requires a menu", OPTIONS_MENU));
            return Ok(());
        }
        if let Some(menu) = checks.optional_str("menu") {
            checks.resource(ResourceType::Menu, menu);
        }
        Ok(())
    }
}

/// Checks `@options-item` methods.
pub struct OptionsItemValidator;

impl Validator for OptionsItemValidator {
    fn kind(&self) -> MarkerKind {
        OPTIONS_ITEM
    }

    fn description(&self) -> &'static str {
        "Menu item handlers take at most the selected item and name known item ids"
    }

    fn requires_catalog(&self) -> bool {
        true
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Method) {
            return Ok(());
        }

        let element = checks.element();
        let params: Vec<&str> = element.params.iter().map(|p| p.ty.as_str()).collect();
        let shaped = match params.as_slice() {
            [] => true,
            [ty] => type_matches(ty, MENU_ITEM),
            _ => false,
        };
        if !shaped {
            checks.error(format!(
                "{} method parameters must be () or ({}), found ({})",
                OPTIONS_ITEM,
                MENU_ITEM,
                params.join(", ")
            ));
        }

        if !element.returns_void() {
            let ty = element.ty.as_deref().unwrap_or_default();
            if !type_matches(ty, "boolean") {
                checks.error(format!(
                    "{} method must return void or boolean, found {}",
                    OPTIONS_ITEM, ty
                ));
            }
        }

        let ids = match checks.declaration().arg("ids") {
            None => Some(vec![default_item_id(&element.name)]),
            Some(_) => checks.optional_str_list("ids"),
        };
        for id in ids.unwrap_or_default() {
            checks.resource(ResourceType::Id, id);
        }
        Ok(())
    }
}
