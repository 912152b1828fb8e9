//! Validation of extracted declarations.
//!
//! Each [`Validator`] is bound to one marker kind. A declaration reaches the
//! [`ValidatedModel`] only if every validator of its kind accepted it and
//! every declaration it depends on was accepted too. Validators see shared
//! read-only context, never each other's verdicts, so the accepted set does
//! not depend on registration order.

mod checks;
pub mod rules;

use std::{collections::HashSet, sync::Arc};

pub use checks::{Checks, Owner};
use eyre::{Result, WrapErr};
use tagsmith_core::MarkerKind;
use tracing::debug;

use crate::{
    ProjectContext, RuleInfo,
    catalog::ResourceCatalog,
    model::{AnnotatedDeclaration, ExtractedModel, ValidatedModel},
    pipeline::Diagnostic,
};

pub(crate) const PHASE: &str = "validate";

/// Read-only context shared by all validators.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub extracted: &'a ExtractedModel,
    /// None when the project symbol table could not be resolved.
    pub catalog: Option<&'a ResourceCatalog>,
    pub project: &'a ProjectContext,
}

/// Checks declarations of one marker kind.
pub trait Validator: Send + Sync {
    /// The marker kind this validator is bound to.
    fn kind(&self) -> MarkerKind;

    /// A human-readable description of what is checked.
    fn description(&self) -> &'static str;

    /// Whether every check needs the resource catalog.
    ///
    /// Without a catalog such validators reject every declaration without
    /// running [`check`](Validator::check).
    fn requires_catalog(&self) -> bool {
        false
    }

    /// Check one declaration. Rejections are recorded on `checks`; an `Err`
    /// is a fault and aborts the run.
    fn check(&self, checks: &mut Checks<'_>) -> Result<()>;

    /// Get information about this validator.
    fn info(&self) -> RuleInfo {
        RuleInfo {
            kind: self.kind(),
            description: self.description(),
        }
    }
}

/// Ordered collection of validators.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorRegistry {
    /// Create a registry with no validators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator.
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.register(validator);
        self
    }

    /// Add a validator.
    pub fn register(&mut self, validator: impl Validator + 'static) {
        debug!(kind = %validator.kind(), "registered validator");
        self.validators.push(Box::new(validator));
    }

    /// Get information about all registered validators.
    pub fn info(&self) -> Vec<RuleInfo> {
        self.validators.iter().map(|v| v.info()).collect()
    }

    /// Whether any validator is bound to `kind`.
    pub fn handles(&self, kind: &MarkerKind) -> bool {
        self.validators.iter().any(|v| &v.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Validate every extracted declaration.
    ///
    /// Diagnostics are appended to `diagnostics` as they are found, so the
    /// ones recorded before a fault survive it.
    pub fn validate(
        &self,
        ctx: &ValidationContext<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<ValidatedModel> {
        let mut accepted = Vec::new();

        for kind in ctx.extracted.kinds() {
            let declarations = ctx.extracted.declarations(kind);
            let validators: Vec<&dyn Validator> = self
                .validators
                .iter()
                .filter(|v| &v.kind() == kind)
                .map(|v| v.as_ref())
                .collect();

            if validators.is_empty() {
                diagnostics.push(Diagnostic::warning(
                    PHASE,
                    format!(
                        "{} declaration(s) marked {} ignored: no validator is registered for this kind",
                        declarations.len(),
                        kind
                    ),
                ));
                continue;
            }

            let before = accepted.len();
            for declaration in declarations {
                let mut ok = true;
                let mut owners = Vec::new();

                for validator in &validators {
                    if validator.requires_catalog() && ctx.catalog.is_none() {
                        ok = false;
                        diagnostics.push(
                            Diagnostic::error(
                                PHASE,
                                format!("cannot validate {}: resource catalog unavailable", kind),
                            )
                            .at(declaration),
                        );
                        continue;
                    }

                    let mut checks = Checks::new(declaration, ctx);
                    let result = validator.check(&mut checks);
                    owners.extend(checks.owners().iter().cloned());
                    let (passed, found) = checks.finish();
                    diagnostics.extend(found);
                    result.wrap_err_with(|| format!("validating {}", declaration))?;
                    ok &= passed;
                }

                if ok {
                    accepted.push((Arc::clone(declaration), owners));
                }
            }

            debug!(
                %kind,
                extracted = declarations.len(),
                accepted = accepted.len() - before,
                "validated marker kind"
            );
        }

        self.drop_orphans(&mut accepted, diagnostics);

        let mut validated = ValidatedModel::default();
        for (declaration, _) in accepted {
            validated.accept(declaration);
        }
        Ok(validated)
    }

    /// Drop accepted declarations whose owner was not accepted, repeating
    /// until every remaining owner is present.
    ///
    /// Owners of a kind no validator handles are not checked here; those
    /// declarations were already reported as ignored.
    fn drop_orphans(
        &self,
        accepted: &mut Vec<(Arc<AnnotatedDeclaration>, Vec<Owner>)>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        loop {
            let present: HashSet<Owner> = accepted
                .iter()
                .map(|(declaration, _)| Owner {
                    element: declaration.qualified_name(),
                    marker: declaration.marker.clone(),
                })
                .collect();
            let before = accepted.len();

            accepted.retain(|(declaration, owners)| {
                let missing = owners
                    .iter()
                    .find(|owner| self.handles(&owner.marker) && !present.contains(owner));
                let Some(owner) = missing else {
                    return true;
                };
                debug!(%declaration, owner = %owner.element, "dropped member of rejected owner");
                diagnostics.push(
                    Diagnostic::warning(
                        PHASE,
                        format!(
                            "{} skipped: {} {} was rejected",
                            declaration.marker, owner.marker, owner.element
                        ),
                    )
                    .at(declaration),
                );
                false
            });

            if accepted.len() == before {
                break;
            }
        }
    }
}
