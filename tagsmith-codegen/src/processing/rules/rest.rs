use eyre::Result;
use tagsmith_core::MarkerKind;
use tagsmith_ir::{Expr, FieldSpec, GeneratedType, Statement, TypeRef};

use super::{override_of, return_type};
use crate::{
    markers::{HttpMethod, REST, url_placeholders},
    model::AnnotatedDeclaration,
    processing::{ProcessingContext, Processor, RestClientHolder},
};

const REST_TEMPLATE: &str = "restTemplate";
const ROOT_URL: &str = "rootUrl";
const URL_VARIABLES: &str = "urlVariables";

/// Generates REST client classes.
pub struct RestProcessor;

impl Processor for RestProcessor {
    fn kind(&self) -> MarkerKind {
        REST
    }

    fn description(&self) -> &'static str {
        "Generates a client class holding the rest template and root url"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let interface = declaration.qualified_name();
        let generated = ctx.project().generated_name(&interface);
        let template = TypeRef::named("org.springframework.web.client.RestTemplate");

        let mut ty = GeneratedType::new(&generated, &interface)
            .implements(TypeRef::named(&interface))
            .final_();
        ty.add_field(
            FieldSpec::new(REST_TEMPLATE, template.clone()).init(Expr::new_(template, vec![])),
        );
        ty.add_field(
            FieldSpec::new(ROOT_URL, TypeRef::string())
                .init(Expr::str(declaration.arg_str("root_url").unwrap_or_default())),
        );
        ctx.model.insert(ty);

        ctx.holders
            .register_rest_client(RestClientHolder { interface, generated });
        Ok(())
    }
}

/// Implements REST request methods for one [`HttpMethod`].
pub struct RestMethodProcessor(pub HttpMethod);

impl Processor for RestMethodProcessor {
    fn kind(&self) -> MarkerKind {
        self.0.marker()
    }

    fn description(&self) -> &'static str {
        "Implements the request method on the generated REST client"
    }

    fn process(
        &self,
        declaration: &AnnotatedDeclaration,
        ctx: &mut ProcessingContext<'_>,
    ) -> Result<()> {
        let element = &declaration.element;
        let url = declaration.arg_str("url").unwrap_or_default();
        let placeholders = url_placeholders(url);
        let client = ctx.rest_client_type(&element.owner)?;

        let mut method = override_of(element);
        let variables = if placeholders.is_empty() {
            None
        } else {
            let map = TypeRef::generic(
                "java.util.HashMap",
                vec![TypeRef::string(), TypeRef::named("java.lang.Object")],
            );
            method = method.statement(Statement::local(
                map.clone(),
                URL_VARIABLES,
                Expr::new_(map, vec![]),
            ));
            for name in &placeholders {
                method = method.statement(Statement::expr(Expr::call_on(
                    Expr::ident(URL_VARIABLES),
                    "put",
                    vec![Expr::str(*name), Expr::ident(*name)],
                )));
            }
            Some(Expr::ident(URL_VARIABLES))
        };

        let full_url = Expr::Concat {
            parts: vec![Expr::this_field(ROOT_URL), Expr::str(url)],
        };
        let body = element
            .params
            .iter()
            .find(|p| !placeholders.contains(&p.name.as_str()))
            .map(|p| Expr::ident(&p.name))
            .unwrap_or(Expr::Null);
        let returns = return_type(element);
        let response = if returns.is_void() {
            TypeRef::named("java.lang.Void")
        } else {
            returns.clone()
        };

        let (call, mut args) = match self.0 {
            HttpMethod::Get => (
                "getForObject",
                vec![full_url, Expr::ClassLiteral { ty: response }],
            ),
            HttpMethod::Post => (
                "postForObject",
                vec![full_url, body, Expr::ClassLiteral { ty: response }],
            ),
            HttpMethod::Put => ("put", vec![full_url, body]),
            HttpMethod::Delete => ("delete", vec![full_url]),
            HttpMethod::Head => ("headForHeaders", vec![full_url]),
            HttpMethod::Options => ("optionsForAllow", vec![full_url]),
        };
        args.extend(variables);

        let request = Expr::call_on(Expr::this_field(REST_TEMPLATE), call, args);
        let statement = if returns.is_void() {
            Statement::expr(request)
        } else {
            Statement::return_(request)
        };

        client.methods.push(method.statement(statement));
        Ok(())
    }
}
