use eyre::Result;
use tagsmith_core::{ElementKind, MarkerKind};

use super::component_member;
use crate::{
    markers::{LifecycleHook, TRANSACTIONAL, ThreadKind, type_matches},
    validation::{Checks, Validator},
};

const SQLITE_DATABASE: &str = "android.database.sqlite.SQLiteDatabase";

/// Checks threading methods for one [`ThreadKind`].
pub struct ThreadingValidator(pub ThreadKind);

impl Validator for ThreadingValidator {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Threaded methods must be overridable void methods without checked exceptions"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Method) {
            return Ok(());
        }
        checks.not_static();
        checks.not_abstract();
        checks.not_final();
        checks.returns_void();
        checks.no_throws();
        checks.not_combined_with(&self.0.opposite().marker());
        checks.not_combined_with(&TRANSACTIONAL);

        if let Some(delay) = checks.optional_int("delay")
            && delay < 0
        {
            checks.error(format!(
                "{} delay must not be negative, found {}",
                self.0.marker(),
                delay
            ));
        }
        Ok(())
    }
}

/// Checks lifecycle hook methods for one [`LifecycleHook`].
pub struct LifecycleValidator(pub LifecycleHook);

impl Validator for LifecycleValidator {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Lifecycle hooks must be void methods without parameters"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Method) {
            return Ok(());
        }
        checks.no_params();
        checks.returns_void();
        Ok(())
    }
}

/// Checks `@transactional` methods.
pub struct TransactionalValidator;

impl Validator for TransactionalValidator {
    fn kind(&self) -> MarkerKind {
        TRANSACTIONAL
    }

    fn description(&self) -> &'static str {
        "Transactional methods must be overridable and take the database first"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Method) {
            return Ok(());
        }
        checks.not_static();
        checks.not_final();
        for thread in ThreadKind::ALL {
            checks.not_combined_with(&thread.marker());
        }

        let first = checks.element().params.first().map(|p| p.ty.as_str());
        if !first.is_some_and(|ty| type_matches(ty, SQLITE_DATABASE)) {
            checks.error(format!(
                "{} method must take a {} as its first parameter",
                TRANSACTIONAL, SQLITE_DATABASE
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tagsmith_core::Modifier;

    use super::*;
    use crate::{
        markers::ENHANCED_COMPONENT,
        pipeline::Diagnostic,
        testing::{DeclarationExt, Fixture, class, method},
    };

    const MAIN: &str = "com.example.Main";

    fn component() -> Fixture {
        Fixture::new().declare(ENHANCED_COMPONENT, class("com.example", "Main"))
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn test_background_method() {
        let fixture = component().declare(
            ThreadKind::Background.marker(),
            method(MAIN, "load").param("id", "long"),
        );

        let (accepted, diagnostics) = fixture.check(ThreadingValidator(ThreadKind::Background));
        assert_eq!(accepted, ["com.example.Main#load"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_threading_signature_errors() {
        let fixture = component().declare(
            ThreadKind::Ui.marker(),
            method(MAIN, "show")
                .modifier(Modifier::Final)
                .returns("int")
                .throws("java.io.IOException")
                .int_arg("delay", -5),
        );

        let (accepted, diagnostics) = fixture.check(ThreadingValidator(ThreadKind::Ui));
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            [
                "@runs-on-ui-thread cannot be used on a final method",
                "@runs-on-ui-thread method must return void",
                "@runs-on-ui-thread method must not declare checked exceptions (java.io.IOException)",
                "@runs-on-ui-thread delay must not be negative, found -5",
            ]
        );
    }

    #[test]
    fn test_threading_markers_cannot_be_combined() {
        let fixture = component()
            .declare(ThreadKind::Ui.marker(), method(MAIN, "refresh"))
            .declare(ThreadKind::Background.marker(), method(MAIN, "refresh"));

        let (accepted, diagnostics) = fixture.check(ThreadingValidator(ThreadKind::Ui));
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            ["@runs-on-ui-thread cannot be combined with @runs-in-background"]
        );
    }

    #[test]
    fn test_lifecycle_hook_takes_no_params() {
        let fixture = component()
            .declare(LifecycleHook::AfterViews.marker(), method(MAIN, "setup"))
            .declare(
                LifecycleHook::AfterViews.marker(),
                method(MAIN, "fill").param("count", "int"),
            );

        let (accepted, diagnostics) = fixture.check(LifecycleValidator(LifecycleHook::AfterViews));
        assert_eq!(accepted, ["com.example.Main#setup"]);
        assert_eq!(
            messages(&diagnostics),
            ["@after-views method must have no parameters, found 1"]
        );
    }

    #[test]
    fn test_transactional_needs_database_first() {
        let fixture = component()
            .declare(
                TRANSACTIONAL,
                method(MAIN, "save")
                    .param("db", "SQLiteDatabase")
                    .param("id", "long"),
            )
            .declare(TRANSACTIONAL, method(MAIN, "purge").param("id", "long"));

        let (accepted, diagnostics) = fixture.check(TransactionalValidator);
        assert_eq!(accepted, ["com.example.Main#save"]);
        assert_eq!(
            messages(&diagnostics),
            ["@transactional method must take a android.database.sqlite.SQLiteDatabase as its first parameter"]
        );
    }

    #[test]
    fn test_transactional_cannot_be_threaded() {
        let fixture = component()
            .declare(
                TRANSACTIONAL,
                method(MAIN, "save").param("db", "SQLiteDatabase"),
            )
            .declare(
                ThreadKind::Background.marker(),
                method(MAIN, "save").param("db", "SQLiteDatabase"),
            );

        let (accepted, diagnostics) = fixture.check(TransactionalValidator);
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            ["@transactional cannot be combined with @runs-in-background"]
        );

        let (accepted, diagnostics) = fixture.check(ThreadingValidator(ThreadKind::Background));
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            ["@runs-in-background cannot be combined with @transactional"]
        );
    }
}
