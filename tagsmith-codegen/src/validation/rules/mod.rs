//! Built-in validators.

mod component;
mod injection;
mod listeners;
mod menu;
mod methods;
mod rest;
mod shared_pref;

pub use component::EnhancedComponentValidator;
pub use injection::{
    ApplicationValidator, BindsViewValidator, ExtraValidator, FromHtmlValidator, PrefValidator,
    ResourceValidator, SystemServiceValidator,
};
pub use listeners::ListenerValidator;
pub(crate) use menu::default_item_id;
pub use menu::{OptionsItemValidator, OptionsMenuValidator};
pub use methods::{LifecycleValidator, ThreadingValidator, TransactionalValidator};
pub use rest::{RestMethodValidator, RestValidator};
pub use shared_pref::SharedPrefValidator;

use tagsmith_core::ElementKind;

use super::Checks;
use crate::markers::ENHANCED_COMPONENT;

/// A non-private member of the given kind declared in an enhanced component.
fn component_member(checks: &mut Checks<'_>, kind: ElementKind) -> bool {
    if !checks.element_kind(&[kind]) {
        return false;
    }
    let enclosed = checks.enclosed_by(&ENHANCED_COMPONENT);
    checks.not_private() && enclosed
}
