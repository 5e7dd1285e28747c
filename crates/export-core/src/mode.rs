//! The four RSocket interaction modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Call/response shape of one exported method.
///
/// Every method resolves to exactly one mode. The mode decides which
/// dispatch primitive the generated client calls and how the declared
/// return type is wrapped.
///
/// # Examples
///
/// ```
/// use rsocket_export_core::InteractionMode;
///
/// let mode = InteractionMode::RequestStream;
/// assert_eq!(mode.primitive_name(), "rsocketRequestStream");
/// assert!(mode.is_multi_valued());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// No reply is expected.
    FireAndForget,
    /// Exactly one reply.
    RequestResponse,
    /// Many replies to one request.
    RequestStream,
    /// Many requests and many replies, both directions at once.
    RequestChannel,
}

impl InteractionMode {
    /// All modes in a fixed order.
    pub const ALL: [Self; 4] = [
        Self::FireAndForget,
        Self::RequestResponse,
        Self::RequestStream,
        Self::RequestChannel,
    ];

    /// Name of the dispatch primitive in the generated `index.js`.
    #[must_use]
    pub const fn primitive_name(&self) -> &'static str {
        match self {
            Self::FireAndForget => "rsocketFireAndForget",
            Self::RequestResponse => "rsocketRequestResponse",
            Self::RequestStream => "rsocketRequestStream",
            Self::RequestChannel => "rsocketRequestChannel",
        }
    }

    /// Returns `true` when the caller receives a sequence of values.
    #[must_use]
    pub const fn is_multi_valued(&self) -> bool {
        matches!(self, Self::RequestStream | Self::RequestChannel)
    }

    /// Stable lower-case label used in CLI output and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FireAndForget => "fire_and_forget",
            Self::RequestResponse => "request_response",
            Self::RequestStream => "request_stream",
            Self::RequestChannel => "request_channel",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_names_are_distinct() {
        let mut names: Vec<_> = InteractionMode::ALL
            .iter()
            .map(InteractionMode::primitive_name)
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_multi_valued() {
        assert!(!InteractionMode::FireAndForget.is_multi_valued());
        assert!(!InteractionMode::RequestResponse.is_multi_valued());
        assert!(InteractionMode::RequestStream.is_multi_valued());
        assert!(InteractionMode::RequestChannel.is_multi_valued());
    }

    #[test]
    fn test_serde_label_matches_display() {
        for mode in InteractionMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
    }
}
