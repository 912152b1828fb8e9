//! Whole-pipeline behavior: the run guard, catalog layering, rule ordering
//! and fault containment.

use std::sync::{Arc, Mutex};

use eyre::{Result, bail};
use tagsmith_core::{MarkerKind, ResourceScope, ResourceType, SymbolEntry};
use tagsmith_ir::Statement;

use super::{Pipeline, PipelineState, RunOutcome, RunStatus, Severity};
use crate::{
    Registry,
    catalog::{LookupError, resolve},
    markers::{BINDS_VIEW, ENHANCED_COMPONENT, EXTRA, HttpMethod, REST, ResourceKind},
    model::AnnotatedDeclaration,
    processing::{ProcessingContext, Processor, ProcessorRegistry, rules as process},
    testing::{
        DeclarationExt, FailingRenderer, Fixture, MemoryHost, RecordingRenderer, class, field,
        interface, method,
    },
    validation::{Checks, ValidationContext, Validator, ValidatorRegistry, rules as validate},
};

const MAIN: &str = "com.example.Main";
const TRACKED: MarkerKind = MarkerKind::from_static("tracked");

fn run(fixture: &Fixture, registry: Registry) -> (RunOutcome, MemoryHost, RecordingRenderer) {
    let mut host = fixture.host();
    let mut renderer = RecordingRenderer::default();
    let mut pipeline = Pipeline::new(registry, fixture.project().clone());
    let outcome = pipeline.run(&fixture.round(), &mut host, &mut renderer);
    (outcome, host, renderer)
}

fn messages(outcome: &RunOutcome, severity: Severity) -> Vec<&str> {
    outcome
        .diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| d.message.as_str())
        .collect()
}

fn activity() -> Fixture {
    Fixture::new()
        .declare(
            ENHANCED_COMPONENT,
            class("com.example", "Main").str_arg("layout", "main"),
        )
        .declare(BINDS_VIEW, field(MAIN, "title", "android.widget.TextView"))
        .declare(
            ResourceKind::String.marker(),
            field(MAIN, "appName", "String").str_arg("name", "app_name"),
        )
        .symbols(&[
            ("layout", "main", 0x7f03_0000),
            ("id", "title", 0x7f08_0001),
            ("string", "app_name", 0x7f0c_0000),
        ])
}

/// Rejects declarations whose simple name starts with "Skip".
struct RejectSkipped;

impl Validator for RejectSkipped {
    fn kind(&self) -> MarkerKind {
        TRACKED
    }

    fn description(&self) -> &'static str {
        "rejects skipped declarations"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        if checks.element().name.starts_with("Skip") {
            checks.error("skipped");
        }
        Ok(())
    }
}

/// Records every declaration it is given.
struct Recorder(Arc<Mutex<Vec<String>>>);

impl Processor for Recorder {
    fn kind(&self) -> MarkerKind {
        TRACKED
    }

    fn description(&self) -> &'static str {
        "records processed declarations"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        _ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        self.0
            .lock()
            .expect("recorder lock")
            .push(declaration.qualified_name());
        Ok(())
    }
}

struct Explode;

impl Processor for Explode {
    fn kind(&self) -> MarkerKind {
        TRACKED
    }

    fn description(&self) -> &'static str {
        "always faults"
    }

    fn process(
        &self,
        _declaration: &AnnotatedDeclaration,
        _ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        bail!("generator exploded")
    }
}

/// Rejects binds-view fields whose name starts with an underscore.
struct NoLeadingUnderscore;

impl Validator for NoLeadingUnderscore {
    fn kind(&self) -> MarkerKind {
        BINDS_VIEW
    }

    fn description(&self) -> &'static str {
        "view fields must not start with an underscore"
    }

    fn check(&self, checks: &mut Checks<'_>) -> Result<()> {
        let name = &checks.element().name;
        if name.starts_with('_') {
            checks.error(format!("{} must not start with an underscore", name));
        }
        Ok(())
    }
}

struct FaultyViews;

impl Validator for FaultyViews {
    fn kind(&self) -> MarkerKind {
        BINDS_VIEW
    }

    fn description(&self) -> &'static str {
        "always faults"
    }

    fn check(&self, _checks: &mut Checks<'_>) -> Result<()> {
        bail!("view validator bug")
    }
}

fn tracked(names: &[&str]) -> Fixture {
    names.iter().fold(Fixture::new(), |fixture, name| {
        fixture.declare(TRACKED, class("com.example", name))
    })
}

#[test]
fn test_happy_path() {
    let fixture = activity();
    let (outcome, host, renderer) = run(&fixture, Registry::standard());

    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.artifacts, 1);
    assert_eq!(messages(&outcome, Severity::Note), ["generated 1 artifact(s)"]);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(host.reported(), outcome.diagnostics.as_slice());

    assert_eq!(renderer.calls(), 1);
    let main = renderer.models[0].get("com.example.Main_").expect("generated activity");
    let on_create = &main.methods[0];
    assert_eq!(on_create.name, "onCreate");
    assert!(on_create.statement_count() >= 4);
}

#[test]
fn test_second_run_is_skipped() {
    let fixture = activity();
    let mut host = fixture.host();
    let mut renderer = RecordingRenderer::default();
    let mut pipeline = Pipeline::new(Registry::standard(), fixture.project().clone());

    let first = pipeline.run(&fixture.round(), &mut host, &mut renderer);
    assert_eq!(first.status, RunStatus::Completed);
    let reported = host.reported().len();

    let second = pipeline.run(&fixture.round(), &mut host, &mut renderer);
    assert_eq!(second.status, RunStatus::Skipped);
    assert!(second.diagnostics.is_empty());
    assert_eq!(second.artifacts, 0);
    assert_eq!(renderer.calls(), 1);
    assert_eq!(host.reported().len(), reported);
}

#[test]
fn test_failed_run_is_not_retried() {
    let fixture = tracked(&["Keep"]);
    let registry = Registry {
        validators: ValidatorRegistry::new().with(RejectSkipped),
        processors: ProcessorRegistry::new().with(Explode),
    };
    let mut host = fixture.host();
    let mut renderer = RecordingRenderer::default();
    let mut pipeline = Pipeline::new(registry, fixture.project().clone());

    let first = pipeline.run(&fixture.round(), &mut host, &mut renderer);
    assert_eq!(first.status, RunStatus::Failed);
    let second = pipeline.run(&fixture.round(), &mut host, &mut renderer);
    assert_eq!(second.status, RunStatus::Skipped);
    assert!(second.diagnostics.is_empty());
}

#[test]
fn test_catalog_project_layer_wins() {
    let catalog = resolve(
        Ok(vec![SymbolEntry::new("id", "title", 1)]),
        Ok(vec![
            SymbolEntry::new("id", "title", 100),
            SymbolEntry::new("id", "text1", 101),
        ]),
    )
    .unwrap();

    let title = catalog.lookup(ResourceType::Id, "title").unwrap();
    assert_eq!((title.scope, title.id), (ResourceScope::Project, 1));

    let text = catalog.lookup(ResourceType::Id, "text1").unwrap();
    assert_eq!((text.scope, text.id), (ResourceScope::Platform, 101));

    assert_eq!(
        catalog.lookup(ResourceType::Id, "missing"),
        Err(LookupError::NotFound {
            ty: ResourceType::Id,
            name: "missing".into(),
        })
    );
}

#[test]
fn test_platform_only_view_id_binds() {
    let fixture = Fixture::new()
        .declare(ENHANCED_COMPONENT, class("com.example", "Main"))
        .declare(
            BINDS_VIEW,
            field(MAIN, "label", "TextView").str_arg("id", "text1"),
        )
        .platform_symbols(&[("id", "text1", 0x0102_0014)]);

    let (outcome, _, renderer) = run(&fixture, Registry::standard());
    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.error_count(), 0);

    let main = renderer.models[0].get("com.example.Main_").unwrap();
    let bound: Vec<_> = main.methods[0]
        .body
        .iter()
        .flat_map(|stmt| match stmt {
            Statement::Section { body, .. } => body.clone(),
            other => vec![other.clone()],
        })
        .collect();
    assert!(
        format!("{:?}", bound).contains("Platform"),
        "expected a platform resource in {:?}",
        bound
    );
}

#[test]
fn test_missing_resource_is_partial_success() {
    let fixture = activity().declare(BINDS_VIEW, field(MAIN, "subtitle", "TextView"));
    let (outcome, _, renderer) = run(&fixture, Registry::standard());

    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(
        messages(&outcome, Severity::Error),
        ["resource R.id.subtitle not found in project or platform resources"]
    );
    let location = outcome.diagnostics[0].location.as_ref().unwrap();
    assert_eq!(location.element, "com.example.Main#subtitle");

    assert_eq!(renderer.calls(), 1);
    assert_eq!(outcome.artifacts, 1);
    let rendered = format!("{:?}", renderer.models[0]);
    assert!(rendered.contains("\"title\""));
    assert!(!rendered.contains("subtitle"));
}

#[test]
fn test_rejected_component_skips_its_members() {
    let fixture = Fixture::new()
        .declare(
            ENHANCED_COMPONENT,
            class("com.example", "Main").str_arg("layout", "nope"),
        )
        .declare(ENHANCED_COMPONENT, class("com.example", "Other"))
        .declare(BINDS_VIEW, field(MAIN, "title", "android.widget.TextView"))
        .declare(
            BINDS_VIEW,
            field("com.example.Other", "body", "android.widget.TextView"),
        )
        .declare(EXTRA, field(MAIN, "noteId", "long"))
        .symbols(&[("id", "title", 0x7f08_0001), ("id", "body", 0x7f08_0002)]);

    let (outcome, _, renderer) = run(&fixture, Registry::standard());

    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(
        messages(&outcome, Severity::Error),
        ["resource R.layout.nope not found in project or platform resources"]
    );
    assert_eq!(
        messages(&outcome, Severity::Warning),
        [
            "@binds-view skipped: @enhanced-component com.example.Main was rejected",
            "@extra skipped: @enhanced-component com.example.Main was rejected",
        ]
    );
    assert_eq!(outcome.warning_count(), 2);

    assert_eq!(renderer.calls(), 1);
    assert_eq!(outcome.artifacts, 1);
    let model = &renderer.models[0];
    assert!(model.get("com.example.Main_").is_none());
    let other = model.get("com.example.Other_").expect("generated component");
    assert!(format!("{:?}", other).contains("\"body\""));
}

#[test]
fn test_rejected_rest_interface_skips_its_methods() {
    let fixture = activity()
        .declare(
            REST,
            interface("com.example", "NotesApi")
                .int_arg("root_url", 3)
                .declares("notes", &[], Some("NoteList")),
        )
        .declare(
            HttpMethod::Get.marker(),
            method("com.example.NotesApi", "notes")
                .returns("NoteList")
                .str_arg("url", "/notes"),
        );

    let (outcome, _, renderer) = run(&fixture, Registry::standard());

    assert_eq!(outcome.status, RunStatus::Completed);
    let errors = messages(&outcome, Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("@rest argument 'root_url' must be a string"));
    assert!(!errors[0].contains("Unexpected error"));
    assert_eq!(
        messages(&outcome, Severity::Warning),
        ["@get skipped: @rest com.example.NotesApi was rejected"]
    );

    assert_eq!(renderer.calls(), 1);
    let model = &renderer.models[0];
    assert!(model.get("com.example.NotesApi_").is_none());
    assert!(model.get("com.example.Main_").is_some());
}

#[test]
fn test_validator_fault_keeps_earlier_rejections() {
    let fixture = tracked(&["SkipMe"]).declare(BINDS_VIEW, field(MAIN, "title", "TextView"));
    let registry = Registry {
        validators: ValidatorRegistry::new()
            .with(RejectSkipped)
            .with(FaultyViews),
        processors: ProcessorRegistry::new(),
    };

    let (outcome, host, renderer) = run(&fixture, registry);

    assert_eq!(outcome.status, RunStatus::Failed);
    assert_eq!(renderer.calls(), 0);
    let errors = messages(&outcome, Severity::Error);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "skipped");
    assert!(errors[1].starts_with("Unexpected error in validate phase: "));
    assert!(errors[1].contains("view validator bug"));
    assert_eq!(host.reported(), outcome.diagnostics.as_slice());
}

#[test]
fn test_only_accepted_declarations_are_processed() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let registry = Registry {
        validators: ValidatorRegistry::new().with(RejectSkipped),
        processors: ProcessorRegistry::new().with(Recorder(Arc::clone(&seen))),
    };
    let fixture = tracked(&["Keep", "SkipMe", "Other"]);

    let (outcome, _, _) = run(&fixture, registry);

    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(messages(&outcome, Severity::Error), ["skipped"]);
    assert_eq!(
        *seen.lock().unwrap(),
        ["com.example.Keep", "com.example.Other"]
    );
}

#[test]
fn test_validator_order_does_not_matter() {
    let fixture = activity()
        .declare(BINDS_VIEW, field(MAIN, "subtitle", "TextView"))
        .declare(BINDS_VIEW, field(MAIN, "_footer", "TextView"))
        .declare(
            ResourceKind::String.marker(),
            field(MAIN, "count", "int").str_arg("name", "app_name"),
        )
        .symbols(&[("id", "_footer", 0x7f08_0002)]);
    let extracted = fixture.extracted();
    let catalog = fixture.catalog();
    let ctx = ValidationContext {
        extracted: &extracted,
        catalog: catalog.as_ref(),
        project: fixture.project(),
    };

    let forward = ValidatorRegistry::new()
        .with(validate::EnhancedComponentValidator)
        .with(validate::BindsViewValidator)
        .with(NoLeadingUnderscore)
        .with(validate::ResourceValidator(ResourceKind::String));
    let reversed = ValidatorRegistry::new()
        .with(validate::ResourceValidator(ResourceKind::String))
        .with(NoLeadingUnderscore)
        .with(validate::BindsViewValidator)
        .with(validate::EnhancedComponentValidator);

    let summarize = |registry: &ValidatorRegistry| {
        let mut diagnostics = Vec::new();
        let validated = registry.validate(&ctx, &mut diagnostics).unwrap();
        let mut accepted: Vec<String> = validated
            .kinds()
            .flat_map(|kind| {
                validated
                    .declarations(kind)
                    .iter()
                    .map(move |d| format!("{} {}", kind, d.qualified_name()))
            })
            .collect();
        accepted.sort();
        let mut diagnostics: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
        diagnostics.sort();
        (accepted, diagnostics)
    };

    let (accepted, diagnostics) = summarize(&forward);
    assert_eq!(
        accepted,
        [
            "@binds-view com.example.Main#title",
            "@enhanced-component com.example.Main",
            "@string-res com.example.Main#appName",
        ]
    );
    assert_eq!(diagnostics.len(), 3);
    assert_eq!((accepted, diagnostics), summarize(&reversed));
}

#[test]
fn test_rest_methods_need_their_client_first() {
    let fixture = Fixture::new()
        .declare(
            REST,
            interface("com.example", "NotesApi")
                .str_arg("root_url", "https://notes.example.com")
                .declares("notes", &[], Some("NoteList")),
        )
        .declare(
            HttpMethod::Get.marker(),
            method("com.example.NotesApi", "notes")
                .returns("NoteList")
                .str_arg("url", "/notes"),
        );

    let (outcome, _, renderer) = run(&fixture, Registry::standard());
    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(renderer.calls(), 1);

    let reversed = Registry {
        validators: Registry::standard().validators,
        processors: ProcessorRegistry::new()
            .with(process::RestMethodProcessor(HttpMethod::Get))
            .with(process::RestProcessor),
    };
    let (outcome, _, renderer) = run(&fixture, reversed);
    assert_eq!(outcome.status, RunStatus::Failed);
    assert_eq!(renderer.calls(), 0);
    let errors = messages(&outcome, Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("no REST client holder for com.example.NotesApi"));
}

#[test]
fn test_processing_fault_is_one_error() {
    let registry = Registry {
        validators: ValidatorRegistry::new().with(RejectSkipped),
        processors: ProcessorRegistry::new().with(Explode),
    };
    let fixture = tracked(&["Keep", "Other"]);
    let mut host = fixture.host();
    let mut renderer = RecordingRenderer::default();
    let mut pipeline = Pipeline::new(registry, fixture.project().clone());

    let outcome = pipeline.run(&fixture.round(), &mut host, &mut renderer);

    assert_eq!(outcome.status, RunStatus::Failed);
    assert_eq!(pipeline.state(), PipelineState::Failed);
    assert_eq!(renderer.calls(), 0);
    assert_eq!(outcome.diagnostics.len(), 1);

    let fault = &outcome.diagnostics[0];
    assert_eq!(fault.severity, Severity::Error);
    assert_eq!(fault.phase, "process");
    assert!(fault.message.starts_with("Unexpected error in process phase: "));
    assert!(fault.message.contains("generator exploded"));
    assert_eq!(
        fault.location.as_ref().map(|l| l.element.as_str()),
        Some("com.example.Keep")
    );
    assert_eq!(host.reported(), outcome.diagnostics.as_slice());

    let timed: Vec<_> = pipeline.stats().entries().map(|(name, _)| name).collect();
    assert_eq!(timed, ["extract", "resolve", "validate", "process"]);
}

#[test]
fn test_renderer_fault() {
    let fixture = activity();
    let mut host = fixture.host();
    let mut renderer = FailingRenderer;
    let mut pipeline = Pipeline::new(Registry::standard(), fixture.project().clone());

    let outcome = pipeline.run(&fixture.round(), &mut host, &mut renderer);

    assert_eq!(outcome.status, RunStatus::Failed);
    assert_eq!(outcome.artifacts, 0);
    let errors = messages(&outcome, Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Unexpected error in render phase: "));
    assert!(errors[0].contains("output directory is not writable"));
    assert!(messages(&outcome, Severity::Note).is_empty());
}

#[test]
fn test_panic_is_contained() {
    let fixture = activity();
    let mut host = fixture.host().panic_on(BINDS_VIEW);
    let mut renderer = RecordingRenderer::default();
    let mut pipeline = Pipeline::new(Registry::standard(), fixture.project().clone());

    let outcome = pipeline.run(&fixture.round(), &mut host, &mut renderer);

    assert_eq!(outcome.status, RunStatus::Failed);
    assert_eq!(renderer.calls(), 0);
    assert_eq!(outcome.diagnostics.len(), 1);
    let fault = &outcome.diagnostics[0];
    assert_eq!(fault.phase, "extract");
    assert!(
        fault
            .message
            .contains("panicked: declaration lookup for @binds-view panicked")
    );
    let location = fault.location.as_ref().unwrap();
    assert_eq!(location.marker, ENHANCED_COMPONENT);
    assert_eq!(location.element, MAIN);
}

#[test]
fn test_unavailable_catalog_rejects_resource_declarations() {
    let fixture = activity().without_catalog();
    let (outcome, _, renderer) = run(&fixture, Registry::standard());

    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(
        messages(&outcome, Severity::Warning),
        ["resource catalog unavailable: project symbol table not found"]
    );
    // layout, view and string lookups all fail
    assert_eq!(outcome.error_count(), 3);
    assert_eq!(renderer.calls(), 1);
    assert_eq!(outcome.artifacts, 0);
}
