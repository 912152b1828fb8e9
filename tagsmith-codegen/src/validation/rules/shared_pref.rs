use eyre::Result;
use tagsmith_core::{ElementKind, MarkerKind};

use crate::{
    markers::{SHARED_PREF, type_matches},
    validation::{Checks, Validator},
};

/// Value types a preference accessor may return.
const PREFERENCE_TYPES: [&str; 5] = ["int", "long", "float", "boolean", "java.lang.String"];

/// Checks `@shared-pref` interfaces.
pub struct SharedPrefValidator;

impl Validator for SharedPrefValidator {
    fn kind(&self) -> MarkerKind {
        SHARED_PREF
    }

    fn description(&self) -> &'static str {
        "Preference interfaces may only declare typed getters"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !checks.element_kind(&[ElementKind::Interface]) {
            return Ok(());
        }

        for method in &checks.element().methods {
            if !method.params.is_empty() {
                checks.error(format!(
                    "preference {} must not take parameters",
                    method.name
                ));
            }
            let ty = method.returns.as_deref().unwrap_or("void");
            if !PREFERENCE_TYPES
                .iter()
                .any(|accepted| type_matches(ty, accepted))
            {
                checks.error(format!(
                    "preference {} must return int, long, float, boolean or String, found {}",
                    method.name, ty
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DeclarationExt, Fixture, class, interface};

    #[test]
    fn test_typed_getters_are_accepted() {
        let fixture = Fixture::new().declare(
            SHARED_PREF,
            interface("com.example", "Prefs")
                .declares("name", &[], Some("String"))
                .declares("launches", &[], Some("long")),
        );

        let (accepted, diagnostics) = fixture.check(SharedPrefValidator);
        assert_eq!(accepted, ["com.example.Prefs"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_bad_accessors() {
        let fixture = Fixture::new().declare(
            SHARED_PREF,
            interface("com.example", "Prefs")
                .declares("lookup", &[("key", "String")], Some("String"))
                .declares("reset", &[], None),
        );

        let (accepted, diagnostics) = fixture.check(SharedPrefValidator);
        assert!(accepted.is_empty());
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "preference lookup must not take parameters",
                "preference reset must return int, long, float, boolean or String, found void",
            ]
        );
    }

    #[test]
    fn test_class_is_rejected() {
        let fixture = Fixture::new().declare(SHARED_PREF, class("com.example", "Prefs"));
        let (accepted, _) = fixture.check(SharedPrefValidator);
        assert!(accepted.is_empty());
    }
}
