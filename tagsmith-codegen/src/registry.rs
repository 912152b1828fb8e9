//! Marker kind registration.

use serde::Serialize;
use tagsmith_core::MarkerKind;

use crate::{
    markers::{HttpMethod, LifecycleHook, ListenerKind, ResourceKind, ThreadKind},
    processing::{ProcessorRegistry, rules as process},
    validation::{ValidatorRegistry, rules as validate},
};

/// Information about a registered validator or processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub kind: MarkerKind,
    pub description: &'static str,
}

/// Validators and processors for every supported marker kind.
#[derive(Default)]
pub struct Registry {
    pub validators: ValidatorRegistry,
    pub processors: ProcessorRegistry,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in marker kinds.
    ///
    /// Components and REST clients register the holders their members attach
    /// to and must be processed before them.
    pub fn standard() -> Self {
        let mut validators = ValidatorRegistry::new()
            .with(validate::EnhancedComponentValidator)
            .with(validate::SharedPrefValidator)
            .with(validate::RestValidator)
            .with(validate::BindsViewValidator)
            .with(validate::FromHtmlValidator)
            .with(validate::PrefValidator)
            .with(validate::OptionsMenuValidator)
            .with(validate::OptionsItemValidator);
        let mut processors = ProcessorRegistry::new()
            .with(process::EnhancedComponentProcessor)
            .with(process::SharedPrefProcessor)
            .with(process::RestProcessor)
            .with(process::BindsViewProcessor)
            .with(process::FromHtmlProcessor)
            .with(process::PrefProcessor)
            .with(process::OptionsMenuProcessor)
            .with(process::OptionsItemProcessor);

        for kind in ResourceKind::ALL {
            validators.register(validate::ResourceValidator(kind));
            processors.register(process::ResourceProcessor(kind));
        }
        for kind in ListenerKind::ALL {
            validators.register(validate::ListenerValidator(kind));
            processors.register(process::ListenerProcessor(kind));
        }
        for kind in ThreadKind::ALL {
            validators.register(validate::ThreadingValidator(kind));
            processors.register(process::ThreadingProcessor(kind));
        }

        validators.register(validate::ExtraValidator);
        processors.register(process::ExtraProcessor);
        validators.register(validate::SystemServiceValidator);
        processors.register(process::SystemServiceProcessor);

        for hook in LifecycleHook::ALL {
            validators.register(validate::LifecycleValidator(hook));
            processors.register(process::LifecycleProcessor(hook));
        }

        validators.register(validate::TransactionalValidator);
        processors.register(process::TransactionalProcessor);
        validators.register(validate::ApplicationValidator);
        processors.register(process::ApplicationProcessor);

        for method in HttpMethod::ALL {
            validators.register(validate::RestMethodValidator(method));
            processors.register(process::RestMethodProcessor(method));
        }

        Self {
            validators,
            processors,
        }
    }

    /// Marker kinds in processor order.
    pub fn kinds(&self) -> Vec<MarkerKind> {
        self.processors.info().into_iter().map(|info| info.kind).collect()
    }
}
