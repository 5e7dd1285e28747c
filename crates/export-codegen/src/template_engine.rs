//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the pre-registered RSocket templates. Each generated
//! artifact has a literal skeleton template and one or more fragment
//! templates; fragments are rendered and joined in Rust, then handed to the
//! skeleton, so template text and composition logic stay independently
//! testable.
//!
//! Output is JavaScript, not HTML, so escaping is disabled. String literals
//! that end up in generated code go through the `json` helper, which emits a
//! double-quoted JSON string.
//!
//! # Examples
//!
//! ```
//! use rsocket_export_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let out = engine.render_template("{{json route}}", &json!({"route": "a\"b"})).unwrap();
//! assert_eq!(out, r#""a\"b""#);
//! ```

use handlebars::{Handlebars, handlebars_helper, no_escape};
use rsocket_export_core::{Error, Result};
use serde::Serialize;

handlebars_helper!(json: |v: Json| v.to_string());

/// Registered templates: name and source.
const TEMPLATES: &[(&str, &str)] = &[
    ("rsocket/index.js", include_str!("../templates/rsocket/index.js.hbs")),
    ("rsocket/method.js", include_str!("../templates/rsocket/method.js.hbs")),
    ("rsocket/typedef.js", include_str!("../templates/rsocket/typedef.js.hbs")),
    ("rsocket/index.d.ts", include_str!("../templates/rsocket/index.d.ts.hbs")),
    ("rsocket/function.d.ts", include_str!("../templates/rsocket/function.d.ts.hbs")),
    ("rsocket/class.d.ts", include_str!("../templates/rsocket/class.d.ts.hbs")),
];

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be used across
/// thread boundaries safely.
#[derive(Debug)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Creates a new template engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);
        handlebars.register_helper("json", Box::new(json));

        for (name, source) in TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    template: (*name).to_string(),
                    message: format!("registration failed: {e}"),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a registered template with the given context.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if the template is unknown, a field is
    /// missing from the context, or rendering fails.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                template: template_name.to_string(),
                message: e.to_string(),
            })
    }

    /// Renders an ad-hoc template string with the engine's settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if the string is not a valid template
    /// or rendering fails.
    pub fn render_template<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(|e| Error::TemplateError {
                template: "<inline>".to_string(),
                message: e.to_string(),
            })
    }

    /// Registers an additional template.
    ///
    /// # Errors
    ///
    /// Returns `Error::TemplateError` if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                template: name.to_string(),
                message: format!("registration failed: {e}"),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_engine_creation() {
        let engine = TemplateEngine::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(engine.has_template(name), "{name} not registered");
        }
    }

    #[test]
    fn test_no_html_escaping() {
        let engine = TemplateEngine::new().unwrap();
        let out = engine
            .render_template("{{t}}", &json!({"t": "Promise<Array<string>> & 'x'"}))
            .unwrap();
        assert_eq!(out, "Promise<Array<string>> & 'x'");
    }

    #[test]
    fn test_strict_mode_missing_field() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render_template("{{missing}}", &json!({})).unwrap_err();
        assert!(err.is_template_error());
    }

    #[test]
    fn test_unknown_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("rsocket/nope", &json!({})).unwrap_err();
        assert!(err.to_string().contains("rsocket/nope"));
    }

    #[test]
    fn test_register_custom_template() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template_string("custom", "// {{name}}")
            .unwrap();
        assert_eq!(engine.render("custom", &json!({"name": "x"})).unwrap(), "// x");
    }

    #[test]
    fn test_json_helper_quotes() {
        let engine = TemplateEngine::new().unwrap();
        let out = engine
            .render_template("{{json s}}", &json!({"s": "org.demo.AccountService.findById"}))
            .unwrap();
        assert_eq!(out, "\"org.demo.AccountService.findById\"");
    }
}
