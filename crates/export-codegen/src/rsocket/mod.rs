//! RSocket client renderers.
//!
//! [`StubRenderer`] produces `index.js`, [`DeclarationRenderer`] produces
//! `index.d.ts`. Both take an already populated
//! [`TypeRegistry`](crate::TypeRegistry) and never register anything
//! themselves.

mod declaration;
mod stub;

pub use declaration::DeclarationRenderer;
pub use stub::StubRenderer;

use crate::common::typescript::to_js_identifier;
use rsocket_export_core::InteractionMode;
use rsocket_export_introspector::MethodDescriptor;

/// JavaScript identifiers of a method's parameters, in declaration order.
fn param_identifiers(method: &MethodDescriptor) -> Vec<String> {
    method
        .params
        .iter()
        .map(|p| to_js_identifier(&p.name))
        .collect()
}

/// Arguments passed to the dispatch primitive after the method name.
///
/// Channels pass the outbound sequence and then the leading parameter, if
/// any. Every other mode sends no payload, the single value, or an array of
/// all values.
fn call_arguments(mode: InteractionMode, names: &[String]) -> String {
    match (mode, names) {
        (_, []) => String::new(),
        (InteractionMode::RequestChannel, [stream]) => format!(", {stream}"),
        (InteractionMode::RequestChannel, [leading @ .., stream]) => {
            format!(", {stream}, {}", array_literal(leading))
        }
        (_, [single]) => format!(", {single}"),
        (_, all) => format!(", {}", array_literal(all)),
    }
}

fn array_literal(names: &[String]) -> String {
    match names {
        [single] => single.clone(),
        all => format!("[{}]", all.join(", ")),
    }
}

/// Non-empty description lines, safe to place inside a block comment.
fn description_lines(method: &MethodDescriptor) -> Vec<String> {
    method
        .description
        .as_deref()
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.replace("*/", "*\\/"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_unary_arguments() {
        let mode = InteractionMode::RequestResponse;
        assert_eq!(call_arguments(mode, &[]), "");
        assert_eq!(call_arguments(mode, &names(&["id"])), ", id");
        assert_eq!(call_arguments(mode, &names(&["id", "nick"])), ", [id, nick]");
    }

    #[test]
    fn test_channel_arguments() {
        let mode = InteractionMode::RequestChannel;
        assert_eq!(call_arguments(mode, &names(&["updates"])), ", updates");
        assert_eq!(
            call_arguments(mode, &names(&["id", "updates"])),
            ", updates, id"
        );
    }
}
