use eyre::{Result, eyre};
use tagsmith_core::{MarkerKind, MethodSig, simple_name};
use tagsmith_ir::{
    ConstructorSpec, Expr, FieldSpec, GeneratedType, MethodSpec, ParamSpec, Statement, TypeRef,
};

use crate::{
    markers::{SHARED_PREF, type_matches},
    model::AnnotatedDeclaration,
    processing::{ProcessingContext, Processor},
};

const PREFERENCES: &str = "preferences_";

/// `SharedPreferences` getter and default value for a preference type.
fn getter(ty: &str) -> Option<(&'static str, Expr)> {
    let getter = if type_matches(ty, "int") {
        ("getInt", Expr::int(0))
    } else if type_matches(ty, "long") {
        ("getLong", Expr::int(0))
    } else if type_matches(ty, "float") {
        ("getFloat", Expr::int(0))
    } else if type_matches(ty, "boolean") {
        ("getBoolean", Expr::bool(false))
    } else if type_matches(ty, "java.lang.String") {
        ("getString", Expr::Null)
    } else {
        return None;
    };
    Some(getter)
}

fn accessor(sig: &MethodSig) -> Result<MethodSpec> {
    let ty = sig.returns.as_deref().unwrap_or("void");
    let (getter, default) = getter(ty)
        .ok_or_else(|| eyre!("preference {} has unsupported type {}", sig.name, ty))?;

    Ok(MethodSpec::new(&sig.name)
        .override_()
        .returns(TypeRef::parse(ty))
        .statement(Statement::return_(Expr::call_on(
            Expr::this_field(PREFERENCES),
            getter,
            vec![Expr::str(&sig.name), default],
        ))))
}

/// Generates preference helpers.
pub struct SharedPrefProcessor;

impl Processor for SharedPrefProcessor {
    fn kind(&self) -> MarkerKind {
        SHARED_PREF
    }

    fn description(&self) -> &'static str {
        "Generates a helper implementing each getter from SharedPreferences"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let origin = declaration.qualified_name();
        let generated = ctx.project().generated_name(&origin);

        let mut ty = GeneratedType::new(&generated, &origin)
            .implements(TypeRef::named(&origin))
            .final_();
        ty.add_field(
            FieldSpec::new(PREFERENCES, TypeRef::named("android.content.SharedPreferences"))
                .final_(),
        );
        ty.constructors.push(
            ConstructorSpec::new()
                .param(ParamSpec::new("context", TypeRef::named("android.content.Context")))
                .statement(Statement::assign(
                    Expr::this_field(PREFERENCES),
                    Expr::call_on(
                        Expr::ident("context"),
                        "getSharedPreferences",
                        vec![Expr::str(simple_name(&origin)), Expr::int(0)],
                    ),
                )),
        );
        for sig in &declaration.element.methods {
            ty.methods.push(accessor(sig)?);
        }

        ctx.model.insert(ty);
        Ok(())
    }
}
