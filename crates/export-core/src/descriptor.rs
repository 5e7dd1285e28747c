//! Closed type model of a reflected service contract.
//!
//! Type expressions from the reflection document are resolved once into a
//! [`TypeDescriptor`]. Renderers match on the descriptor exhaustively and
//! never look at the original type names again.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width/precision of a numeric type.
///
/// Every kind maps to the JavaScript `number`; the distinction is kept only
/// for inspection output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericKind {
    /// 8-bit integer
    Byte,
    /// 16-bit integer
    Short,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Arbitrary precision decimal or integer
    Decimal,
}

impl NumericKind {
    /// Lower-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
        }
    }
}

/// Identity of a record (structured) type, usually its fully qualified name.
///
/// # Examples
///
/// ```
/// use rsocket_export_core::RecordId;
///
/// let id = RecordId::new("org.mvnsearch.account.Account");
/// assert_eq!(id.simple_name(), "Account");
///
/// let nested = RecordId::new("org.mvnsearch.Outer$Inner");
/// assert_eq!(nested.simple_name(), "Inner");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a record identity.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name after the last `.` or `$` separator.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.rsplit(['.', '$']).next().unwrap_or(&self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved type of a parameter, return value, or record field.
///
/// # Examples
///
/// ```
/// use rsocket_export_core::{RecordId, TypeDescriptor};
///
/// // Mono<List<Account>>
/// let ty = TypeDescriptor::single(TypeDescriptor::list(TypeDescriptor::Record(
///     RecordId::new("Account"),
/// )));
/// assert_eq!(ty.to_string(), "Single<List<Account>>");
/// assert_eq!(ty.inferred_payload().to_string(), "Account");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Any numeric width
    Number(NumericKind),
    /// Boolean value
    Boolean,
    /// Text or single character
    Text,
    /// Absence of a value
    Void,
    /// Date, time, or instant
    DateTime,
    /// Raw byte sequence
    Binary,
    /// Ordered collection
    List(Box<TypeDescriptor>),
    /// Single-value reactive wrapper
    Single(Box<TypeDescriptor>),
    /// Multi-value reactive sequence
    Stream(Box<TypeDescriptor>),
    /// Named record type
    Record(RecordId),
}

impl TypeDescriptor {
    /// Wraps `inner` in a list.
    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wraps `inner` in a single-value reactive wrapper.
    #[must_use]
    pub fn single(inner: Self) -> Self {
        Self::Single(Box::new(inner))
    }

    /// Wraps `inner` in a multi-value reactive sequence.
    #[must_use]
    pub fn stream(inner: Self) -> Self {
        Self::Stream(Box::new(inner))
    }

    /// Creates a record descriptor.
    #[must_use]
    pub fn record(id: impl Into<String>) -> Self {
        Self::Record(RecordId::new(id))
    }

    /// Type argument of a generic descriptor, if any.
    #[must_use]
    pub fn type_argument(&self) -> Option<&Self> {
        match self {
            Self::List(inner) | Self::Single(inner) | Self::Stream(inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns `true` for `Stream<_>`.
    #[must_use]
    pub const fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Returns `true` for `Single<_>`.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Returns `true` for `Void` and `Single<Void>`.
    #[must_use]
    pub fn is_void_like(&self) -> bool {
        match self {
            Self::Void => true,
            Self::Single(inner) => matches!(**inner, Self::Void),
            _ => false,
        }
    }

    /// Innermost type after unwrapping at most two generic levels.
    ///
    /// `Single<List<Account>>` yields `Account`; deeper nesting stops after
    /// the second level.
    #[must_use]
    pub fn inferred_payload(&self) -> &Self {
        let mut current = self;
        for _ in 0..2 {
            match current.type_argument() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// Removes one `Single` wrapper, leaving everything else intact.
    ///
    /// This is the value a request-response caller actually receives.
    #[must_use]
    pub fn unwrap_single(&self) -> &Self {
        match self {
            Self::Single(inner) => inner,
            other => other,
        }
    }

    /// Element type of a `Stream`/`Single` return, as delivered to callers.
    #[must_use]
    pub fn delivered_element(&self) -> &Self {
        match self {
            Self::Stream(inner) | Self::Single(inner) => inner,
            other => other,
        }
    }

    /// Every record identity referenced by this descriptor, outermost first.
    #[must_use]
    pub fn records(&self) -> Vec<&RecordId> {
        let mut out = Vec::new();
        self.collect_records(&mut out);
        out
    }

    fn collect_records<'a>(&'a self, out: &mut Vec<&'a RecordId>) {
        match self {
            Self::Record(id) => out.push(id),
            Self::List(inner) | Self::Single(inner) | Self::Stream(inner) => {
                inner.collect_records(out);
            }
            _ => {}
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(kind) => write!(f, "Number({})", kind.as_str()),
            Self::Boolean => f.write_str("Boolean"),
            Self::Text => f.write_str("Text"),
            Self::Void => f.write_str("Void"),
            Self::DateTime => f.write_str("DateTime"),
            Self::Binary => f.write_str("Binary"),
            Self::List(inner) => write!(f, "List<{inner}>"),
            Self::Single(inner) => write!(f, "Single<{inner}>"),
            Self::Stream(inner) => write!(f, "Stream<{inner}>"),
            Self::Record(id) => f.write_str(id.simple_name()),
        }
    }
}
