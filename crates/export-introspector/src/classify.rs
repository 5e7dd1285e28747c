//! Interaction classification.
//!
//! Rules, first match wins:
//!
//! 1. exactly one parameter of type `Stream<_>`, or exactly two parameters
//!    whose second is `Stream<_>`: request-channel;
//! 2. return `Void` or `Single<Void>`: fire-and-forget;
//! 3. return `Stream<_>`: request-stream;
//! 4. anything else: request-response.

use rsocket_export_core::{InteractionMode, TypeDescriptor};

/// Result of classifying one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Resolved mode.
    pub mode: InteractionMode,
    /// Set for channels whose return type is `Single<_>`.
    pub single_result_channel: bool,
}

/// Classifies a method from its parameter types and return type.
///
/// Total: every input yields exactly one mode.
///
/// # Examples
///
/// ```
/// use rsocket_export_core::{InteractionMode, TypeDescriptor};
/// use rsocket_export_introspector::classify;
///
/// let id = TypeDescriptor::Number(rsocket_export_core::NumericKind::Int);
/// let patches = TypeDescriptor::stream(TypeDescriptor::record("Patch"));
/// let result = classify(&[&id, &patches], &TypeDescriptor::single(TypeDescriptor::Text));
///
/// assert_eq!(result.mode, InteractionMode::RequestChannel);
/// assert!(result.single_result_channel);
/// ```
#[must_use]
pub fn classify(params: &[&TypeDescriptor], return_type: &TypeDescriptor) -> Classification {
    let is_channel = match params {
        [only] => only.is_stream(),
        [_, second] => second.is_stream(),
        _ => false,
    };

    if is_channel {
        return Classification {
            mode: InteractionMode::RequestChannel,
            single_result_channel: return_type.is_single(),
        };
    }

    let mode = if return_type.is_void_like() {
        InteractionMode::FireAndForget
    } else if return_type.is_stream() {
        InteractionMode::RequestStream
    } else {
        InteractionMode::RequestResponse
    };

    Classification {
        mode,
        single_result_channel: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsocket_export_core::NumericKind;

    fn int() -> TypeDescriptor {
        TypeDescriptor::Number(NumericKind::Int)
    }

    fn stream_of_text() -> TypeDescriptor {
        TypeDescriptor::stream(TypeDescriptor::Text)
    }

    #[test]
    fn test_single_stream_param_is_channel() {
        let s = stream_of_text();
        let result = classify(&[&s], &stream_of_text());
        assert_eq!(result.mode, InteractionMode::RequestChannel);
        assert!(!result.single_result_channel);
    }

    #[test]
    fn test_channel_ignores_void_return() {
        let s = stream_of_text();
        let result = classify(&[&s], &TypeDescriptor::Void);
        assert_eq!(result.mode, InteractionMode::RequestChannel);
    }

    #[test]
    fn test_stream_as_first_of_two_is_not_channel() {
        let s = stream_of_text();
        let i = int();
        let result = classify(&[&s, &i], &TypeDescriptor::Text);
        assert_eq!(result.mode, InteractionMode::RequestResponse);
    }

    #[test]
    fn test_stream_as_third_param_is_not_channel() {
        let (a, b, s) = (int(), int(), stream_of_text());
        let result = classify(&[&a, &b, &s], &stream_of_text());
        assert_eq!(result.mode, InteractionMode::RequestStream);
    }

    #[test]
    fn test_fire_and_forget() {
        let i = int();
        assert_eq!(
            classify(&[&i], &TypeDescriptor::Void).mode,
            InteractionMode::FireAndForget
        );
        assert_eq!(
            classify(&[&i], &TypeDescriptor::single(TypeDescriptor::Void)).mode,
            InteractionMode::FireAndForget
        );
    }

    #[test]
    fn test_stream_return() {
        assert_eq!(
            classify(&[], &stream_of_text()).mode,
            InteractionMode::RequestStream
        );
    }

    #[test]
    fn test_fallback_is_request_response() {
        for ret in [
            TypeDescriptor::Text,
            TypeDescriptor::single(TypeDescriptor::record("Account")),
            TypeDescriptor::list(TypeDescriptor::Void),
            TypeDescriptor::record("Whatever"),
        ] {
            assert_eq!(classify(&[], &ret).mode, InteractionMode::RequestResponse);
        }
    }

    #[test]
    fn test_single_stream_param_in_mono_is_not_channel() {
        let wrapped = TypeDescriptor::single(stream_of_text());
        assert_eq!(
            classify(&[&wrapped], &TypeDescriptor::Text).mode,
            InteractionMode::RequestResponse
        );
    }
}
