use eyre::Result;
use tagsmith_core::{ElementKind, MarkerKind};

use crate::{
    markers::{HttpMethod, REST, type_matches, url_placeholders},
    validation::{Checks, Validator},
};

/// Checks `@rest` interfaces.
pub struct RestValidator;

impl Validator for RestValidator {
    fn kind(&self) -> MarkerKind {
        REST
    }

    fn description(&self) -> &'static str {
        "REST interfaces may only declare request methods"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if !checks.element_kind(&[ElementKind::Interface]) {
            return Ok(());
        }
        checks.optional_str("root_url");

        let qualified = checks.declaration().qualified_name();
        let extracted = checks.context().extracted;
        for method in &checks.element().methods {
            let member = format!("{}#{}", qualified, method.name);
            let marked = HttpMethod::ALL
                .iter()
                .any(|http| extracted.is_annotated(&member, &http.marker()));
            if !marked {
                let markers: Vec<String> =
                    HttpMethod::ALL.iter().map(|m| m.marker().to_string()).collect();
                checks.error(format!(
                    "{} must carry one of {}",
                    member,
                    markers.join(", ")
                ));
            }
        }
        Ok(())
    }
}

/// Checks REST request methods for one [`HttpMethod`].
pub struct RestMethodValidator(pub HttpMethod);

impl Validator for RestMethodValidator {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Request methods must bind every url placeholder to a parameter"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        let marker = self.0.marker();
        if !checks.element_kind(&[ElementKind::Method]) {
            return Ok(());
        }
        checks.enclosed_by(&REST);
        if self.0.requires_void() {
            checks.returns_void();
        }
        let responses = self.0.response_types();
        if let Some(qualified) = responses.first() {
            let ty = checks.element().ty.as_deref().unwrap_or("void");
            if !responses.iter().any(|accepted| type_matches(ty, accepted)) {
                checks.error(format!(
                    "{} method must return {}, found {}",
                    marker, qualified, ty
                ));
            }
        }

        let url = match checks.declaration().arg("url") {
            None => {
                checks.error(format!("{} requires a url", marker));
                return Ok(());
            }
            Some(_) => match checks.optional_str("url") {
                Some(url) => url,
                None => return Ok(()),
            },
        };
        if url.is_empty() {
            checks.error(format!("{} url must not be empty", marker));
            return Ok(());
        }

        let params = &checks.element().params;
        let placeholders = url_placeholders(url);
        for placeholder in &placeholders {
            if !params.iter().any(|p| p.name == *placeholder) {
                checks.error(format!(
                    "url placeholder {{{}}} does not match any parameter",
                    placeholder
                ));
            }
        }

        let body: Vec<&str> = params
            .iter()
            .filter(|p| !placeholders.contains(&p.name.as_str()))
            .map(|p| p.name.as_str())
            .collect();
        if self.0.takes_body() {
            if body.len() > 1 {
                checks.error(format!(
                    "{} method can take at most one request body parameter, found {}",
                    marker,
                    body.join(", ")
                ));
            }
        } else if let Some(name) = body.first() {
            checks.error(format!(
                "{} method parameter {} does not appear in the url",
                marker, name
            ));
        }

        if !url.starts_with('/') {
            checks.warning(format!("{} url '{}' does not start with '/'", marker, url));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::Diagnostic,
        testing::{DeclarationExt, Fixture, interface, method},
    };

    const API: &str = "com.example.NotesApi";

    fn api() -> Fixture {
        Fixture::new().declare(
            REST,
            interface("com.example", "NotesApi")
                .str_arg("root_url", "https://notes.example.com")
                .declares("note", &[("id", "long")], Some("Note"))
                .declares("remove", &[("id", "long")], None),
        )
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn test_rest_interface_methods_must_be_marked() {
        let fixture = api().declare(
            HttpMethod::Get.marker(),
            method(API, "note").param("id", "long").str_arg("url", "/notes/{id}"),
        );

        let (accepted, diagnostics) = fixture.check(RestValidator);
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            ["com.example.NotesApi#remove must carry one of @get, @post, @put, @delete, @head, @options"]
        );
    }

    #[test]
    fn test_get_binds_placeholders() {
        let fixture = api()
            .declare(
                HttpMethod::Get.marker(),
                method(API, "note")
                    .param("id", "long")
                    .returns("Note")
                    .str_arg("url", "/notes/{id}"),
            )
            .declare(
                HttpMethod::Get.marker(),
                method(API, "search")
                    .param("query", "String")
                    .returns("Note")
                    .str_arg("url", "/notes/{q}"),
            );

        let (accepted, diagnostics) = fixture.check(RestMethodValidator(HttpMethod::Get));
        assert_eq!(accepted, ["com.example.NotesApi#note"]);
        assert_eq!(
            messages(&diagnostics),
            [
                "url placeholder {q} does not match any parameter",
                "@get method parameter query does not appear in the url",
            ]
        );
    }

    #[test]
    fn test_post_takes_one_body() {
        let fixture = api()
            .declare(
                HttpMethod::Post.marker(),
                method(API, "create")
                    .param("note", "Note")
                    .returns("Note")
                    .str_arg("url", "/notes"),
            )
            .declare(
                HttpMethod::Post.marker(),
                method(API, "merge")
                    .param("a", "Note")
                    .param("b", "Note")
                    .str_arg("url", "/merge"),
            );

        let (accepted, diagnostics) = fixture.check(RestMethodValidator(HttpMethod::Post));
        assert_eq!(accepted, ["com.example.NotesApi#create"]);
        assert_eq!(
            messages(&diagnostics),
            ["@post method can take at most one request body parameter, found a, b"]
        );
    }

    #[test]
    fn test_put_and_delete_return_void() {
        let fixture = api()
            .declare(
                HttpMethod::Delete.marker(),
                method(API, "remove")
                    .param("id", "long")
                    .returns("boolean")
                    .str_arg("url", "/notes/{id}"),
            )
            .declare(
                HttpMethod::Put.marker(),
                method(API, "update")
                    .param("id", "long")
                    .param("note", "Note")
                    .str_arg("url", "/notes/{id}"),
            );

        let (accepted, diagnostics) = fixture.check(RestMethodValidator(HttpMethod::Delete));
        assert!(accepted.is_empty());
        assert_eq!(messages(&diagnostics), ["@delete method must return void"]);

        let (accepted, diagnostics) = fixture.check(RestMethodValidator(HttpMethod::Put));
        assert_eq!(accepted, ["com.example.NotesApi#update"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_relative_url_warns() {
        let fixture = api().declare(
            HttpMethod::Get.marker(),
            method(API, "all").returns("Notes").str_arg("url", "notes"),
        );

        let (accepted, diagnostics) = fixture.check(RestMethodValidator(HttpMethod::Get));
        assert_eq!(accepted, ["com.example.NotesApi#all"]);
        assert!(diagnostics[0].severity.is_warning());
        assert_eq!(diagnostics[0].message, "@get url 'notes' does not start with '/'");
    }

    #[test]
    fn test_url_is_required_and_method_needs_rest_interface() {
        let fixture = Fixture::new().declare(HttpMethod::Get.marker(), method(API, "all"));

        let (accepted, diagnostics) = fixture.check(RestMethodValidator(HttpMethod::Get));
        assert!(accepted.is_empty());
        assert_eq!(
            messages(&diagnostics),
            ["@get can only be used in a type marked @rest", "@get requires a url"]
        );
    }

    #[test]
    fn test_head_and_options_have_fixed_responses() {
        let fixture = api()
            .declare(
                HttpMethod::Head.marker(),
                method(API, "checkNotes")
                    .returns("HttpHeaders")
                    .str_arg("url", "/notes"),
            )
            .declare(
                HttpMethod::Head.marker(),
                method(API, "noteHeaders")
                    .returns("Note")
                    .str_arg("url", "/notes/1"),
            )
            .declare(
                HttpMethod::Options.marker(),
                method(API, "allowed")
                    .returns("Set<HttpMethod>")
                    .str_arg("url", "/notes"),
            );

        let (accepted, diagnostics) = fixture.check(RestMethodValidator(HttpMethod::Head));
        assert_eq!(accepted, ["com.example.NotesApi#checkNotes"]);
        assert_eq!(
            messages(&diagnostics),
            ["@head method must return org.springframework.http.HttpHeaders, found Note"]
        );

        let (accepted, diagnostics) = fixture.check(RestMethodValidator(HttpMethod::Options));
        assert_eq!(accepted, ["com.example.NotesApi#allowed"]);
        assert!(diagnostics.is_empty());
    }
}
