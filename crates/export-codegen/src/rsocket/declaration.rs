//! `index.d.ts` renderer.

use super::{description_lines, param_identifiers};
use crate::common::typescript::{is_reserved_word, to_js_identifier};
use crate::registry::TypeRegistry;
use crate::template_engine::TemplateEngine;
use crate::type_mapper::static_type;
use rsocket_export_core::{InteractionMode, Result};
use rsocket_export_introspector::{MethodDescriptor, ServiceContract};
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct IndexContext<'a> {
    generated_from: &'a str,
    functions: String,
    classes: String,
}

#[derive(Serialize)]
struct FunctionContext<'a> {
    name: &'a str,
    /// Local binding for names that cannot be declared directly
    alias: Option<String>,
    params: String,
    returns: String,
    doc: Vec<String>,
}

#[derive(Serialize)]
struct ClassContext<'a> {
    name: &'a str,
    properties: Vec<PropertyContext>,
}

#[derive(Serialize)]
struct PropertyContext {
    name: String,
    #[serde(rename = "type")]
    ts_type: String,
}

/// Renders the static type-declaration module.
///
/// Emits one exported function signature per method and one
/// `declare class` per structural type, using exactly the registry names the
/// [`StubRenderer`](super::StubRenderer) uses.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationRenderer<'e> {
    engine: &'e TemplateEngine,
}

impl<'e> DeclarationRenderer<'e> {
    /// Creates a renderer backed by `engine`.
    #[must_use]
    pub const fn new(engine: &'e TemplateEngine) -> Self {
        Self { engine }
    }

    /// Renders `index.d.ts` for a contract.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if a template fails to render.
    pub fn render(&self, contract: &ServiceContract, registry: &TypeRegistry) -> Result<String> {
        let functions = contract
            .methods
            .iter()
            .map(|m| self.render_function(m, registry))
            .collect::<Result<Vec<_>>>()?;

        let classes = self.render_classes(registry)?;

        debug!(
            "Rendered {} declarations and {} classes for {}",
            functions.len(),
            classes.len(),
            contract.route
        );

        self.engine.render(
            "rsocket/index.d.ts",
            &IndexContext {
                generated_from: &contract.type_name,
                functions: functions.join("\n\n"),
                classes: classes.join("\n\n"),
            },
        )
    }

    fn render_function(&self, method: &MethodDescriptor, registry: &TypeRegistry) -> Result<String> {
        let names = param_identifiers(method);

        let params = method
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let ty = param
                    .typedef
                    .as_ref()
                    .map_or_else(|| static_type(&param.ty, registry), |t| t.name.clone());
                let name = &names[index];
                // `?` is only legal when every later parameter is optional too
                let trailing_optional = method.params[index..].iter().all(|p| !p.required);
                match (param.required, trailing_optional) {
                    (true, _) => format!("{name}: {ty}"),
                    (false, true) => format!("{name}?: {ty}"),
                    (false, false) => format!("{name}: {ty} | undefined"),
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut doc = description_lines(method);
        if method.deprecated {
            doc.push("@deprecated".to_string());
        }

        let context = FunctionContext {
            name: &method.name,
            alias: is_reserved_word(&method.name).then(|| to_js_identifier(&method.name)),
            params,
            returns: return_type(method, registry),
            doc,
        };

        Ok(self
            .engine
            .render("rsocket/function.d.ts", &context)?
            .trim_end()
            .to_string())
    }

    fn render_classes(&self, registry: &TypeRegistry) -> Result<Vec<String>> {
        let structural = registry.definitions().map(|def| ClassContext {
            name: &def.name,
            properties: def
                .properties
                .iter()
                .map(|p| PropertyContext {
                    name: p.name.clone(),
                    ts_type: static_type(&p.ty, registry),
                })
                .collect(),
        });
        let custom = registry.custom_types().map(|def| ClassContext {
            name: &def.name,
            properties: def
                .properties
                .iter()
                .map(|p| PropertyContext {
                    name: p.name.clone(),
                    ts_type: p.js_type.clone(),
                })
                .collect(),
        });

        structural
            .chain(custom)
            .map(|context| {
                Ok(self
                    .engine
                    .render("rsocket/class.d.ts", &context)?
                    .trim_end()
                    .to_string())
            })
            .collect()
    }
}

fn return_type(method: &MethodDescriptor, registry: &TypeRegistry) -> String {
    let nullable = |t: String| {
        if method.result_nullable {
            format!("{t} | null")
        } else {
            t
        }
    };

    match method.mode {
        InteractionMode::FireAndForget => "Promise<void>".to_string(),
        InteractionMode::RequestResponse => {
            format!("Promise<{}>", nullable(static_type(&method.return_type, registry)))
        }
        InteractionMode::RequestStream | InteractionMode::RequestChannel => format!(
            "Observable<{}>",
            nullable(static_type(method.return_type.delivered_element(), registry))
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsocket_export_introspector::{Introspector, ServiceReflection};

    fn render(json: &str) -> String {
        let doc = ServiceReflection::from_json_str(json).unwrap();
        let contract = Introspector::new().introspect(&doc).unwrap();
        let engine = TemplateEngine::new().unwrap();
        let registry = TypeRegistry::collect(&contract);
        DeclarationRenderer::new(&engine)
            .render(&contract, &registry)
            .unwrap()
    }

    #[test]
    fn test_header_and_imports() {
        let out = render(r#"{"type_name":"a.PingImpl","route":"a.Ping"}"#);
        assert!(out.contains("import {Observable} from 'rxjs';"));
        assert!(out.contains("import {Flowable} from 'rsocket-flowable';"));
        assert!(out.contains("export function setPromiseRSocket(promiseRSocket: Promise<any>): void;"));
        assert!(out.contains("//================ TypeScript Class ========================//"));
    }

    #[test]
    fn test_optional_parameter_forms() {
        let out = render(
            r#"{"type_name":"a.SearchImpl","route":"a.Search","methods":[
                {"name":"search","route":"direct","returns":"Mono<List<String>>","params":[
                    {"name":"page","type":"int","required":false},
                    {"name":"q","type":"String"},
                    {"name":"limit","type":"int","required":false}
                ]}
            ]}"#,
        );
        assert!(out.contains(
            "export function search(page: number | undefined, q: string, limit?: number): Promise<string[]>;"
        ));
    }

    #[test]
    fn test_fire_and_forget_is_promise_void() {
        let out = render(
            r#"{"type_name":"a.LogImpl","route":"a.Log","methods":[
                {"name":"emit","route":"direct","deprecated":true,"params":[{"name":"line","type":"String"}]}
            ]}"#,
        );
        assert!(out.contains("/**\n * @deprecated\n */\nexport function emit(line: string): Promise<void>;"));
    }

    #[test]
    fn test_nullable_and_stream() {
        let out = render(
            r#"{"type_name":"a.KvImpl","route":"a.Kv","methods":[
                {"name":"get","route":"direct","result_nullable":true,
                 "params":[{"name":"key","type":"String"}],"returns":"Mono<String>"},
                {"name":"watch","route":"direct","returns":"Flux<Long>"}
            ]}"#,
        );
        assert!(out.contains("export function get(key: string): Promise<string | null>;"));
        assert!(out.contains("export function watch(): Observable<number>;"));
    }

    #[test]
    fn test_custom_typedef_declared_as_class() {
        let out = render(
            r#"{"type_name":"a.QueryImpl","route":"a.Query","methods":[
                {"name":"run","route":"direct","returns":"Mono<Long>","params":[
                    {"name":"query","type":"Object","typedef":{
                        "name":"QueryOptions",
                        "properties":[{"name":"text","type":"string"}]
                    }}
                ]}
            ]}"#,
        );
        assert!(out.contains("export function run(query: QueryOptions): Promise<number>;"));
        assert!(out.contains("declare class QueryOptions {\n    text: string;\n}"));
    }

    #[test]
    fn test_reserved_method_name_is_exported_by_alias() {
        let out = render(
            r#"{"type_name":"a.AccountServiceImpl","route":"a.AccountService","methods":[
                {"name":"delete","route":"direct","params":[{"name":"id","type":"int"}],"returns":"Mono<Void>"},
                {"name":"remove","route":"direct","params":[{"name":"id","type":"int"}],"returns":"Mono<Void>"}
            ]}"#,
        );
        assert!(out.contains(
            "declare function delete_(id: number): Promise<void>;\nexport { delete_ as delete };"
        ));
        assert!(!out.contains("export function delete("));
        assert!(out.contains("export function remove(id: number): Promise<void>;"));
    }
}
