//! `index.js` renderer.

use super::{call_arguments, description_lines, param_identifiers};
use crate::registry::TypeRegistry;
use crate::template_engine::TemplateEngine;
use crate::type_mapper::runtime_type;
use rsocket_export_core::{InteractionMode, Result};
use rsocket_export_introspector::{
    CustomTypeDef, MethodDescriptor, ParameterDescriptor, ServiceContract,
};
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct IndexContext<'a> {
    generated_from: &'a str,
    class_name: String,
    class_type: String,
    route: &'a str,
    methods: String,
    typedefs: String,
}

#[derive(Serialize)]
struct MethodContext<'a> {
    name: &'a str,
    params: String,
    primitive: &'static str,
    args: String,
    doc: Vec<String>,
}

#[derive(Serialize)]
struct TypedefContext<'a> {
    name: &'a str,
    properties: Vec<PropertyContext>,
}

#[derive(Serialize)]
struct PropertyContext {
    name: String,
    #[serde(rename = "type")]
    js_type: String,
    description: String,
}

/// Renders the runtime client module.
///
/// The module holds a fixed prelude (routing metadata, JSON payload
/// encoding, channel input normalisation), one class with the four dispatch
/// primitives and one method per exported contract method, and trailing
/// JSDoc typedef blocks for every registered structural type.
#[derive(Debug, Clone, Copy)]
pub struct StubRenderer<'e> {
    engine: &'e TemplateEngine,
}

impl<'e> StubRenderer<'e> {
    /// Creates a renderer backed by `engine`.
    #[must_use]
    pub const fn new(engine: &'e TemplateEngine) -> Self {
        Self { engine }
    }

    /// Renders `index.js` for a contract.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if a template fails to render.
    pub fn render(&self, contract: &ServiceContract, registry: &TypeRegistry) -> Result<String> {
        let methods = contract
            .methods
            .iter()
            .map(|m| self.render_method(m, registry))
            .collect::<Result<Vec<_>>>()?;

        let typedefs = self.render_typedefs(registry)?;

        let class_name = contract.class_name();
        let context = IndexContext {
            generated_from: &contract.type_name,
            class_type: format!("{{{class_name}}}"),
            class_name,
            route: contract.route.as_str(),
            methods: methods.join("\n\n"),
            typedefs: typedefs.join("\n"),
        };

        debug!(
            "Rendered {} JavaScript methods for {}",
            methods.len(),
            contract.route
        );
        self.engine.render("rsocket/index.js", &context)
    }

    fn render_method(&self, method: &MethodDescriptor, registry: &TypeRegistry) -> Result<String> {
        let names = param_identifiers(method);

        let mut doc = description_lines(method);
        if method.deprecated {
            doc.push("@deprecated".to_string());
        }
        doc.extend(
            method
                .params
                .iter()
                .zip(&names)
                .map(|(param, name)| param_tag(param, name, registry)),
        );
        doc.push(format!("@return {{{}}}", return_type(method, registry)));

        let context = MethodContext {
            name: &method.name,
            params: names.join(", "),
            primitive: method.mode.primitive_name(),
            args: call_arguments(method.mode, &names),
            doc,
        };

        Ok(self
            .engine
            .render("rsocket/method.js", &context)?
            .trim_end()
            .to_string())
    }

    fn render_typedefs(&self, registry: &TypeRegistry) -> Result<Vec<String>> {
        let structural = registry.definitions().map(|def| TypedefContext {
            name: &def.name,
            properties: def
                .properties
                .iter()
                .map(|p| PropertyContext {
                    name: p.name.clone(),
                    js_type: jsdoc_type(&runtime_type(&p.ty, registry)),
                    description: String::new(),
                })
                .collect(),
        });
        let custom = registry.custom_types().map(custom_typedef_context);

        structural
            .chain(custom)
            .map(|context| {
                Ok(self
                    .engine
                    .render("rsocket/typedef.js", &context)?
                    .trim_end()
                    .to_string())
            })
            .collect()
    }
}

fn custom_typedef_context(def: &CustomTypeDef) -> TypedefContext<'_> {
    TypedefContext {
        name: &def.name,
        properties: def
            .properties
            .iter()
            .map(|p| PropertyContext {
                name: p.name.clone(),
                js_type: jsdoc_type(&p.js_type),
                description: p.description.clone().unwrap_or_default(),
            })
            .collect(),
    }
}

fn jsdoc_type(name: &str) -> String {
    format!("{{{name}}}")
}

fn param_tag(param: &ParameterDescriptor, name: &str, registry: &TypeRegistry) -> String {
    let js_type = param
        .typedef
        .as_ref()
        .map_or_else(|| runtime_type(&param.ty, registry), |t| t.name.clone());

    let target = match (param.required, param.default_value.as_deref()) {
        (true, _) => name.to_string(),
        (false, Some(default)) if !default.trim().is_empty() => format!("[{name}={default}]"),
        (false, _) => format!("[{name}]"),
    };

    format!("@param {} {target}", jsdoc_type(&js_type))
}

fn return_type(method: &MethodDescriptor, registry: &TypeRegistry) -> String {
    let nullable = |t: String| {
        if method.result_nullable {
            format!("({t}|null)")
        } else {
            t
        }
    };

    match method.mode {
        InteractionMode::FireAndForget => "Promise<boolean>".to_string(),
        InteractionMode::RequestResponse => {
            format!("Promise<{}>", nullable(runtime_type(&method.return_type, registry)))
        }
        InteractionMode::RequestStream | InteractionMode::RequestChannel => format!(
            "Observable<{}>",
            nullable(runtime_type(method.return_type.delivered_element(), registry))
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsocket_export_introspector::{Introspector, ServiceReflection};

    fn contract(json: &str) -> ServiceContract {
        let doc = ServiceReflection::from_json_str(json).unwrap();
        Introspector::new().introspect(&doc).unwrap()
    }

    fn render(contract: &ServiceContract) -> String {
        let engine = TemplateEngine::new().unwrap();
        let registry = TypeRegistry::collect(contract);
        StubRenderer::new(&engine).render(contract, &registry).unwrap()
    }

    #[test]
    fn test_empty_contract_still_renders_prelude() {
        let out = render(&contract(r#"{"type_name":"a.PingServiceImpl","route":"a.PingService"}"#));
        assert!(out.contains("class PingService {"));
        assert!(out.contains("this.serviceName = \"a.PingService\";"));
        assert!(out.contains("module.exports = new PingService();"));
        assert!(out.contains("function requestMetadata(route)"));
        assert!(out.contains("@return {PingService}"));
    }

    #[test]
    fn test_channel_rejects_empty_array_without_initial_frame() {
        let out = render(&contract(r#"{"type_name":"a.PingServiceImpl","route":"a.PingService"}"#));
        let channel = &out[out.find("rsocketRequestChannel(methodName").unwrap()..];
        let guard = channel
            .find("if (initial === undefined && Array.isArray(param) && param.length === 0) {")
            .unwrap();
        let convert = channel.find("frames = toFlowable(param);").unwrap();
        let rejected = channel.find("subscriber.error(error);").unwrap();

        assert!(guard < convert && convert < rejected);
        assert!(channel.contains("throw new TypeError('request channel needs at least one frame');"));
    }

    #[test]
    fn test_optional_params_and_defaults() {
        let out = render(&contract(
            r#"{"type_name":"a.SearchImpl","route":"a.Search","methods":[
                {"name":"search","route":"direct","returns":"Flux<String>","params":[
                    {"name":"q","type":"String"},
                    {"name":"limit","type":"int","required":false,"default_value":"10"},
                    {"name":"sort","type":"String","required":false}
                ]}
            ]}"#,
        ));
        assert!(out.contains("* @param {string} q\n"));
        assert!(out.contains("* @param {number} [limit=10]\n"));
        assert!(out.contains("* @param {string} [sort]\n"));
        assert!(out.contains("* @return {Observable<string>}\n"));
        assert!(out.contains("search(q, limit, sort) {"));
        assert!(out.contains("return this.rsocketRequestStream(\"search\", [q, limit, sort]);"));
    }

    #[test]
    fn test_fire_and_forget_and_deprecated() {
        let out = render(&contract(
            r#"{"type_name":"a.LogImpl","route":"a.Log","methods":[
                {"name":"emit","route":"direct","deprecated":true,"description":"Write */ a line",
                 "params":[{"name":"line","type":"String"}],"returns":"Mono<Void>"}
            ]}"#,
        ));
        assert!(out.contains("* Write *\\/ a line\n"));
        assert!(out.contains("* @deprecated\n"));
        assert!(out.contains("* @return {Promise<boolean>}\n"));
        assert!(out.contains("return this.rsocketFireAndForget(\"emit\", line);"));
    }

    #[test]
    fn test_nullable_result() {
        let out = render(&contract(
            r#"{"type_name":"a.KvImpl","route":"a.Kv","methods":[
                {"name":"get","route":"direct","result_nullable":true,
                 "params":[{"name":"key","type":"String"}],"returns":"Mono<String>"}
            ]}"#,
        ));
        assert!(out.contains("* @return {Promise<(string|null)>}\n"));
    }

    #[test]
    fn test_custom_typedef_param() {
        let out = render(&contract(
            r#"{"type_name":"a.QueryImpl","route":"a.Query","methods":[
                {"name":"run","route":"direct","returns":"Mono<Long>","params":[
                    {"name":"query","type":"java.util.Map<String,Object>","typedef":{
                        "name":"QueryOptions",
                        "properties":[{"name":"text","type":"string","description":"full text"}]
                    }}
                ]}
            ]}"#,
        ));
        assert!(out.contains("* @param {QueryOptions} query\n"));
        assert!(out.contains(" * @typedef {Object} QueryOptions\n * @property {string} text full text\n"));
    }

    #[test]
    fn test_reserved_parameter_name_is_renamed() {
        let out = render(&contract(
            r#"{"type_name":"a.FooImpl","route":"a.Foo","methods":[
                {"name":"make","route":"direct","returns":"Mono<String>",
                 "params":[{"name":"new","type":"String"}]}
            ]}"#,
        ));
        assert!(out.contains("make(new_) {"));
        assert!(out.contains("* @param {string} new_\n"));
    }
}
