use eyre::{Result, eyre};
use tagsmith_core::MarkerKind;
use tagsmith_ir::{Expr, FieldSpec, MethodSpec, Statement, TypeRef};

use super::{forward_args, outer, override_of, sections};
use crate::{
    markers::{LifecycleHook, TRANSACTIONAL, ThreadKind},
    model::AnnotatedDeclaration,
    processing::{ProcessingContext, Processor},
};

const HANDLER: &str = "handler_";
const BACKGROUND_EXECUTOR: &str = "tagsmith.api.BackgroundExecutor";

/// Overrides threaded methods to hop threads before calling `super`.
pub struct ThreadingProcessor(pub ThreadKind);

impl Processor for ThreadingProcessor {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Overrides the method to run super inside a Runnable on the target thread"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let ty = ctx.component_type(&element.owner)?;

        let run = MethodSpec::new("run")
            .override_()
            .statement(Statement::expr(Expr::call_on(
                outer(&ty.name, "super"),
                &element.name,
                forward_args(element),
            )));
        let runnable = Expr::anonymous(TypeRef::named("java.lang.Runnable"), vec![run]);

        let dispatch = match self.0 {
            ThreadKind::Ui => {
                ty.add_field(
                    FieldSpec::new(HANDLER, TypeRef::named("android.os.Handler"))
                        .final_()
                        .init(Expr::new_(
                            TypeRef::named("android.os.Handler"),
                            vec![Expr::call_on(
                                Expr::ident("android.os.Looper"),
                                "getMainLooper",
                                vec![],
                            )],
                        )),
                );
                let handler = Expr::this_field(HANDLER);
                match declaration.arg_int("delay") {
                    Some(delay) if delay > 0 => {
                        Expr::call_on(handler, "postDelayed", vec![runnable, Expr::int(delay)])
                    }
                    _ => Expr::call_on(handler, "post", vec![runnable]),
                }
            }
            ThreadKind::Background => Expr::call_on(
                Expr::ident(BACKGROUND_EXECUTOR),
                "execute",
                vec![runnable],
            ),
        };

        ty.methods
            .push(override_of(element).statement(Statement::expr(dispatch)));
        Ok(())
    }
}

/// Appends lifecycle hook calls to their `onCreate` section.
pub struct LifecycleProcessor(pub LifecycleHook);

impl Processor for LifecycleProcessor {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Calls the method from the matching onCreate section"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let label = match self.0 {
            LifecycleHook::BeforeCreate => sections::BEFORE_CREATE,
            LifecycleHook::AfterViews => sections::AFTER_VIEWS,
        };
        let element = &declaration.element;
        ctx.section(&element.owner, label)?
            .push(Statement::expr(Expr::call(&element.name, vec![])));
        Ok(())
    }
}

/// Wraps transactional methods in a database transaction.
pub struct TransactionalProcessor;

impl Processor for TransactionalProcessor {
    fn kind(&self) -> MarkerKind {
        TRANSACTIONAL
    }

    fn description(&self) -> &'static str {
        "Overrides the method to call super between begin and end transaction"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let db = element
            .params
            .first()
            .map(|p| Expr::ident(&p.name))
            .ok_or_else(|| eyre!("{} has no database parameter", element))?;

        let ty = ctx.component_type(&element.owner)?;
        let call = Expr::call_on(Expr::Super, &element.name, forward_args(element));
        let successful = Statement::expr(Expr::call_on(
            db.clone(),
            "setTransactionSuccessful",
            vec![],
        ));

        let method = override_of(element);
        let body = if method.return_type.is_void() {
            vec![Statement::expr(call), successful]
        } else {
            vec![
                Statement::local(method.return_type.clone(), "result_", call),
                successful,
                Statement::return_(Expr::ident("result_")),
            ]
        };

        ty.methods.push(
            method
                .statement(Statement::expr(Expr::call_on(
                    db.clone(),
                    "beginTransaction",
                    vec![],
                )))
                .statement(Statement::TryFinally {
                    body,
                    finally: vec![Statement::expr(Expr::call_on(db, "endTransaction", vec![]))],
                }),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tagsmith_core::Modifier;
    use tagsmith_ir::{GeneratedType, Visibility};

    use super::*;
    use crate::{
        markers::ENHANCED_COMPONENT,
        testing::{DeclarationExt, Fixture, class, method},
    };

    const MAIN: &str = "com.example.Main";

    fn generated(fixture: Fixture) -> GeneratedType {
        let generated = fixture.generate();
        assert!(
            generated.diagnostics.is_empty(),
            "unexpected diagnostics: {:?}",
            generated.diagnostics
        );
        generated.model.get("com.example.Main_").unwrap().clone()
    }

    fn component() -> Fixture {
        Fixture::new().declare(ENHANCED_COMPONENT, class("com.example", "Main"))
    }

    #[test]
    fn test_ui_thread_with_delay() {
        let ty = generated(component().declare(
            ThreadKind::Ui.marker(),
            method(MAIN, "show")
                .modifier(Modifier::Protected)
                .param("text", "String")
                .int_arg("delay", 500),
        ));

        assert!(ty.has_field("handler_"));
        let show = ty.methods.iter().find(|m| m.name == "show").unwrap();
        assert!(show.is_override);
        assert_eq!(show.visibility, Visibility::Protected);
        assert!(show.params[0].is_final);

        let Statement::Expr {
            expr: Expr::Call { method, args, .. },
        } = &show.body[0]
        else {
            panic!("expected a post call");
        };
        assert_eq!(method, "postDelayed");
        assert_eq!(args[1], Expr::int(500));

        let Expr::Anonymous { class } = &args[0] else {
            panic!("expected a Runnable");
        };
        assert_eq!(
            class.methods[0].body,
            [Statement::expr(Expr::call_on(
                outer("com.example.Main_", "super"),
                "show",
                vec![Expr::ident("text")],
            ))]
        );
    }

    #[test]
    fn test_background_uses_executor() {
        let ty = generated(component().declare(ThreadKind::Background.marker(), method(MAIN, "load")));

        assert!(!ty.has_field("handler_"));
        let load = ty.methods.iter().find(|m| m.name == "load").unwrap();
        let Statement::Expr {
            expr: Expr::Call { target, method, .. },
        } = &load.body[0]
        else {
            panic!("expected an execute call");
        };
        assert_eq!(method, "execute");
        assert_eq!(
            target.as_deref(),
            Some(&Expr::ident("tagsmith.api.BackgroundExecutor"))
        );
    }

    #[test]
    fn test_lifecycle_hooks_land_in_sections() {
        let ty = generated(
            component()
                .declare(LifecycleHook::AfterViews.marker(), method(MAIN, "setup"))
                .declare(LifecycleHook::BeforeCreate.marker(), method(MAIN, "prepare")),
        );

        let body = &ty.methods[0].body;
        assert_eq!(
            body[0],
            Statement::Section {
                label: sections::BEFORE_CREATE.into(),
                body: vec![Statement::expr(Expr::call("prepare", vec![]))],
            }
        );
        assert_eq!(
            body.last(),
            Some(&Statement::Section {
                label: sections::AFTER_VIEWS.into(),
                body: vec![Statement::expr(Expr::call("setup", vec![]))],
            })
        );
    }

    #[test]
    fn test_transactional_returns_result() {
        let ty = generated(
            component().declare(
                TRANSACTIONAL,
                method(MAIN, "count")
                    .param("db", "SQLiteDatabase")
                    .returns("int"),
            ),
        );

        let count = ty.methods.iter().find(|m| m.name == "count").unwrap();
        assert_eq!(count.body.len(), 2);
        let Statement::TryFinally { body, finally } = &count.body[1] else {
            panic!("expected try/finally");
        };
        assert_eq!(body.len(), 3);
        assert_eq!(body[2], Statement::return_(Expr::ident("result_")));
        assert_eq!(
            finally,
            &[Statement::expr(Expr::call_on(
                Expr::ident("db"),
                "endTransaction",
                vec![],
            ))]
        );
    }
}
