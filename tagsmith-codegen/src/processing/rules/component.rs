use eyre::Result;
use tagsmith_core::{MarkerKind, ResourceType};
use tagsmith_ir::{Expr, GeneratedType, MethodSpec, ParamSpec, Statement, TypeRef, Visibility};

use super::{ON_CREATE, sections};
use crate::{
    markers::ENHANCED_COMPONENT,
    model::AnnotatedDeclaration,
    processing::{ComponentHolder, ProcessingContext, Processor},
};

const BUNDLE: &str = "android.os.Bundle";

/// Generates the component subclass other processors contribute to.
pub struct EnhancedComponentProcessor;

impl Processor for EnhancedComponentProcessor {
    fn kind(&self) -> MarkerKind {
        ENHANCED_COMPONENT
    }

    fn description(&self) -> &'static str {
        "Generates a subclass with an onCreate holding ordered injection sections"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let origin = declaration.qualified_name();
        let generated = ctx.project().generated_name(&origin);

        let saved_state = Expr::ident("savedInstanceState");
        let mut body = vec![
            Statement::section(sections::BEFORE_CREATE),
            Statement::section(sections::INJECT),
            Statement::expr(Expr::call_on(Expr::Super, ON_CREATE, vec![saved_state])),
        ];
        if let Some(layout) = declaration.arg_str("layout") {
            let layout = ctx.resource(ResourceType::Layout, layout)?;
            body.push(Statement::expr(Expr::call(
                "setContentView",
                vec![Expr::resource(layout)],
            )));
        }
        body.extend([
            Statement::section(sections::BIND_VIEWS),
            Statement::section(sections::BIND_LISTENERS),
            Statement::section(sections::AFTER_VIEWS),
        ]);

        let on_create = MethodSpec::new(ON_CREATE)
            .visibility(Visibility::Public)
            .override_()
            .param(ParamSpec::new("savedInstanceState", TypeRef::named(BUNDLE)))
            .statements(body);

        let mut ty = GeneratedType::new(&generated, &origin).extends(TypeRef::named(&origin));
        ty.methods.push(on_create);
        ctx.model.insert(ty);

        ctx.holders.register_component(ComponentHolder { origin, generated });
        Ok(())
    }
}
