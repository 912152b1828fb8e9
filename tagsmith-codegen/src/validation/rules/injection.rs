use eyre::Result;
use tagsmith_core::{ElementKind, MarkerKind, ResourceType};

use super::component_member;
use crate::{
    markers::{
        APPLICATION, BINDS_VIEW, EXTRA, FROM_HTML, PREF, ResourceKind, SHARED_PREF, SYSTEM_SERVICE,
        type_matches,
    },
    validation::{Checks, Validator},
};

/// Checks `@binds-view` fields.
pub struct BindsViewValidator;

impl Validator for BindsViewValidator {
    fn kind(&self) -> MarkerKind {
        BINDS_VIEW
    }

    fn description(&self) -> &'static str {
        "View fields must be assignable from the subclass and name a known id"
    }

    fn requires_catalog(&self) -> bool {
        true
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Field) {
            return Ok(());
        }
        checks.not_static();
        checks.field_type();

        let element = checks.element();
        if let Some(id) = checks.str_or("id", &element.name) {
            checks.resource(ResourceType::Id, id);
        }
        Ok(())
    }
}

/// View types that display text.
const TEXT_VIEWS: [&str; 4] = [
    "android.widget.TextView",
    "android.widget.EditText",
    "android.widget.Button",
    "android.widget.CheckBox",
];

/// Checks `@from-html` fields.
pub struct FromHtmlValidator;

impl Validator for FromHtmlValidator {
    fn kind(&self) -> MarkerKind {
        FROM_HTML
    }

    fn description(&self) -> &'static str {
        "HTML text fields must be bound text views and name a known string"
    }

    fn requires_catalog(&self) -> bool {
        true
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Field) {
            return Ok(());
        }
        checks.also_marked(&BINDS_VIEW);

        if let Some(ty) = checks.field_type()
            && !TEXT_VIEWS.iter().any(|view| type_matches(ty, view))
        {
            checks.error(format!(
                "{} field must be a text view ({}), found {}",
                FROM_HTML,
                TEXT_VIEWS.join(", "),
                ty
            ));
        }

        let element = checks.element();
        if let Some(name) = checks.str_or("name", &element.name) {
            checks.resource(ResourceType::String, name);
        }
        Ok(())
    }
}

/// Checks resource injection fields for one [`ResourceKind`].
pub struct ResourceValidator(pub ResourceKind);

impl Validator for ResourceValidator {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Resource fields must have a compatible type and name a known resource"
    }

    fn requires_catalog(&self) -> bool {
        true
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Field) {
            return Ok(());
        }

        if let Some(ty) = checks.field_type()
            && !self.0.accepts(ty)
        {
            checks.error(format!(
                "{} field must be one of {}, found {}",
                self.0.marker(),
                self.0.accepted_types().join(", "),
                ty
            ));
        }

        let element = checks.element();
        if let Some(name) = checks.str_or("name", &element.name) {
            checks.resource(self.0.resource_type(), name);
        }
        Ok(())
    }
}

/// Checks `@extra` fields.
pub struct ExtraValidator;

impl Validator for ExtraValidator {
    fn kind(&self) -> MarkerKind {
        EXTRA
    }

    fn description(&self) -> &'static str {
        "Extra fields must be assignable and use a non-empty key"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Field) {
            return Ok(());
        }
        checks.field_type();

        let element = checks.element();
        if checks.str_or("key", &element.name) == Some("") {
            checks.error(format!("{} key must not be empty", EXTRA));
        }
        Ok(())
    }
}

/// Checks `@pref` fields.
pub struct PrefValidator;

impl Validator for PrefValidator {
    fn kind(&self) -> MarkerKind {
        PREF
    }

    fn description(&self) -> &'static str {
        "Preference fields must hold the helper generated for a @shared-pref interface"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Field) {
            return Ok(());
        }
        let Some(ty) = checks.field_type() else {
            return Ok(());
        };

        let context = checks.context();
        let origin = context
            .extracted
            .declarations(&SHARED_PREF)
            .iter()
            .map(|d| d.qualified_name())
            .find(|origin| type_matches(ty, &context.project.generated_name(origin)));
        match origin {
            Some(origin) => checks.depends_on(origin, &SHARED_PREF),
            None => checks.error(format!(
                "{} field type {} is not a helper generated for a {} interface",
                PREF, ty, SHARED_PREF
            )),
        }
        Ok(())
    }
}

/// Checks `@system-service` fields.
pub struct SystemServiceValidator;

impl Validator for SystemServiceValidator {
    fn kind(&self) -> MarkerKind {
        SYSTEM_SERVICE
    }

    fn description(&self) -> &'static str {
        "System service fields must have a known service type"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Field) {
            return Ok(());
        }

        if let Some(ty) = checks.field_type()
            && checks.context().project.services.constant_for(ty).is_none()
        {
            checks.error(format!("{} is not a known system service", ty));
        }
        Ok(())
    }
}

/// Checks `@application` fields.
pub struct ApplicationValidator;

impl Validator for ApplicationValidator {
    fn kind(&self) -> MarkerKind {
        APPLICATION
    }

    fn description(&self) -> &'static str {
        "Application fields must match the declared application class"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !component_member(checks, ElementKind::Field) {
            return Ok(());
        }

        let Some(application) = checks.context().project.application.as_deref() else {
            checks.error(format!(
                "{} requires [project].application in tagsmith.toml",
                APPLICATION
            ));
            return Ok(());
        };

        if let Some(ty) = checks.field_type()
            && !type_matches(ty, application)
        {
            checks.error(format!(
                "{} field must have type {}, found {}",
                APPLICATION, application, ty
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
        testing::{DeclarationExt, Fixture, class, field, interface},
    };

    const MAIN: &str = "com.example.Main";

    fn component() -> Fixture {
        Fixture::new().declare(ENHANCED_COMPONENT, class("com.example", "Main"))
    }

    fn messages(diagnostics: &[crate::pipeline::Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn test_binds_view_with_explicit_id() {
        let fixture = component()
            .declare(
                BINDS_VIEW,
                field(MAIN, "titleView", "android.widget.TextView").str_arg("id", "title"),
            )
            .symbols(&[("id", "title", 10)]);

        let (accepted, diagnostics) = fixture.check(BindsViewValidator);
        assert_eq!(accepted, ["com.example.Main#titleView"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_binds_view_defaults_id_to_field_name() {
        let fixture = component()
            .declare(BINDS_VIEW, field(MAIN, "title", "TextView"))
            .symbols(&[("id", "body", 11)]);

        let (accepted, diagnostics) = fixture.check(BindsViewValidator);
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            ["resource R.id.title not found in project or platform resources"]
        );
    }

    #[test]
    fn test_binds_view_outside_component() {
        let fixture = Fixture::new()
            .declare(
                BINDS_VIEW,
                field(MAIN, "title", "TextView").modifier(Modifier::Private),
            )
            .symbols(&[("id", "title", 10)]);

        let (accepted, diagnostics) = fixture.check(BindsViewValidator);
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            [
                "@binds-view can only be used in a type marked @enhanced-component",
                "@binds-view cannot be used on a private field",
            ]
        );
    }

    #[test]
    fn test_binds_view_without_catalog() {
        let fixture = component()
            .declare(BINDS_VIEW, field(MAIN, "title", "TextView"))
            .without_catalog();

        let (accepted, diagnostics) = fixture.check(BindsViewValidator);
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            ["cannot validate @binds-view: resource catalog unavailable"]
        );
    }

    #[test]
    fn test_platform_resource_is_found() {
        let fixture = component()
            .declare(
                ResourceKind::String.marker(),
                field(MAIN, "ok", "String"),
            )
            .platform_symbols(&[("string", "ok", 0x0104000a)]);

        let (accepted, _) = fixture.check(ResourceValidator(ResourceKind::String));
        assert_eq!(accepted, ["com.example.Main#ok"]);
    }

    #[test]
    fn test_resource_field_type_must_match() {
        let fixture = component()
            .declare(
                ResourceKind::Color.marker(),
                field(MAIN, "accent", "String"),
            )
            .symbols(&[("color", "accent", 3)]);

        let (accepted, diagnostics) = fixture.check(ResourceValidator(ResourceKind::Color));
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            ["@color-res field must be one of int, java.lang.Integer, found String"]
        );
    }

    #[test]
    fn test_extra_key() {
        let fixture = component()
            .declare(EXTRA, field(MAIN, "noteId", "long"))
            .declare(EXTRA, field(MAIN, "mode", "String").str_arg("key", ""));

        let (accepted, diagnostics) = fixture.check(ExtraValidator);
        assert_eq!(accepted, ["com.example.Main#noteId"]);
        assert_eq!(messages(&diagnostics), ["@extra key must not be empty"]);
    }

    #[test]
    fn test_system_service_type() {
        let fixture = component()
            .declare(
                SYSTEM_SERVICE,
                field(MAIN, "notifications", "android.app.NotificationManager"),
            )
            .declare(SYSTEM_SERVICE, field(MAIN, "gadget", "com.example.Gadget"));

        let (accepted, diagnostics) = fixture.check(SystemServiceValidator);
        assert_eq!(accepted, ["com.example.Main#notifications"]);
        assert_eq!(
            messages(&diagnostics),
            ["com.example.Gadget is not a known system service"]
        );
    }

    #[test]
    fn test_application_requires_declared_class() {
        let fixture = component().declare(APPLICATION, field(MAIN, "app", "NotesApp"));

        let (accepted, diagnostics) = fixture.check(ApplicationValidator);
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            ["@application requires [project].application in tagsmith.toml"]
        );

        let fixture = fixture.application("com.example.NotesApp");
        let (accepted, _) = fixture.check(ApplicationValidator);
        assert_eq!(accepted, ["com.example.Main#app"]);
    }

    #[test]
    fn test_application_type_mismatch() {
        let fixture = component()
            .application("com.example.NotesApp")
            .declare(APPLICATION, field(MAIN, "app", "android.app.Application"));

        let (_, diagnostics) = fixture.check(ApplicationValidator);
        assert_eq!(
            messages(&diagnostics),
            ["@application field must have type com.example.NotesApp, found android.app.Application"]
        );
    }

    #[test]
    fn test_from_html_needs_a_bound_text_view() {
        let fixture = component()
            .declare(BINDS_VIEW, field(MAIN, "intro", "TextView"))
            .declare(
                FROM_HTML,
                field(MAIN, "intro", "TextView").str_arg("name", "intro_html"),
            )
            .declare(FROM_HTML, field(MAIN, "legal", "TextView"))
            .declare(BINDS_VIEW, field(MAIN, "banner", "ImageView"))
            .declare(FROM_HTML, field(MAIN, "banner", "ImageView"))
            .symbols(&[
                ("string", "intro_html", 1),
                ("string", "legal", 2),
                ("string", "banner", 3),
            ]);

        let (accepted, diagnostics) = fixture.check(FromHtmlValidator);
        assert_eq!(accepted, ["com.example.Main#intro"]);
        assert_eq!(
            messages(&diagnostics),
            [
                "@from-html requires the field to also be marked @binds-view",
                "@from-html field must be a text view (android.widget.TextView, android.widget.EditText, android.widget.Button, android.widget.CheckBox), found ImageView",
            ]
        );
    }

    #[test]
    fn test_pref_names_a_generated_helper() {
        let fixture = component()
            .declare(SHARED_PREF, interface("com.example", "Settings"))
            .declare(PREF, field(MAIN, "settings", "Settings_"))
            .declare(PREF, field(MAIN, "raw", "Settings"));

        let (accepted, diagnostics) = fixture.check(PrefValidator);
        assert_eq!(accepted, ["com.example.Main#settings"]);
        assert_eq!(
            messages(&diagnostics),
            ["@pref field type Settings is not a helper generated for a @shared-pref interface"]
        );
    }
}
