//! Type expression parsing and resolution.
//!
//! Grammar:
//!
//! ```text
//! expr  := "()" | ident ("<" expr ("," expr)* ">")? ("[" "]")*
//! ident := [A-Za-z0-9_.$]+ | "?" (("extends" | "super") expr)?
//! ```
//!
//! Parsed expressions are resolved against a fixed table of built-in names
//! and the record names of the reflection document. Unknown names become
//! record identities; resolution itself never fails.

use rsocket_export_core::{Error, NumericKind, RecordId, Result, TypeDescriptor};
use std::fmt;

/// Parsed, unresolved type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    /// Raw (possibly qualified) type name.
    pub name: String,
    /// Generic type arguments.
    pub args: Vec<Self>,
    /// Number of trailing `[]` suffixes.
    pub array_dims: usize,
}

impl TypeExpr {
    /// Parses a type expression.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTypeExpression` on empty input, unbalanced
    /// brackets, or trailing garbage.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsocket_export_introspector::TypeExpr;
    ///
    /// let expr = TypeExpr::parse("Mono<List<Account>>").unwrap();
    /// assert_eq!(expr.name, "Mono");
    /// assert_eq!(expr.args[0].args[0].name, "Account");
    ///
    /// assert!(TypeExpr::parse("Mono<").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = Parser {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        };
        let expr = parser.expr()?;
        parser.skip_ws();
        if parser.pos < parser.chars.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(expr)
    }

    /// Name after the last `.` or `$`.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit(['.', '$']).next().unwrap_or(&self.name)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.array_dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, reason: &str) -> Error {
        Error::InvalidTypeExpression {
            expression: self.input.to_string(),
            reason: format!("{reason} at offset {}", self.offset()),
        }
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.input.len(), |(offset, _)| *offset)
    }

    fn ident(&mut self) -> Option<String> {
        self.skip_ws();
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '$'))
        {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        Some(self.chars[start..self.pos].iter().map(|(_, c)| c).collect())
    }

    fn expr(&mut self) -> Result<TypeExpr> {
        self.skip_ws();

        if self.eat('(') {
            if self.eat(')') {
                return Ok(TypeExpr {
                    name: "()".to_string(),
                    args: Vec::new(),
                    array_dims: 0,
                });
            }
            return Err(self.error("expected ')'"));
        }

        if self.eat('?') {
            // Wildcards resolve to their bound, or to Object when unbounded.
            let save = self.pos;
            if let Some(word) = self.ident() {
                if word == "extends" || word == "super" {
                    return self.expr();
                }
                self.pos = save;
            }
            return Ok(TypeExpr {
                name: "java.lang.Object".to_string(),
                args: Vec::new(),
                array_dims: 0,
            });
        }

        let name = self
            .ident()
            .ok_or_else(|| self.error("expected type name"))?;

        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.expr()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }

        let mut array_dims = 0;
        while self.eat('[') {
            if !self.eat(']') {
                return Err(self.error("expected ']'"));
            }
            array_dims += 1;
        }

        Ok(TypeExpr {
            name,
            args,
            array_dims,
        })
    }
}

enum Builtin {
    Number(NumericKind),
    Boolean,
    Text,
    Void,
    DateTime,
    Binary,
    Collection,
    Optional,
    Single,
    Stream,
}

fn builtin(simple: &str) -> Option<Builtin> {
    let found = match simple {
        "byte" | "Byte" | "i8" | "u8" => Builtin::Number(NumericKind::Byte),
        "short" | "Short" | "i16" | "u16" => Builtin::Number(NumericKind::Short),
        "int" | "Integer" | "i32" | "u32" | "AtomicInteger" => Builtin::Number(NumericKind::Int),
        "long" | "Long" | "i64" | "u64" | "isize" | "usize" | "AtomicLong" => {
            Builtin::Number(NumericKind::Long)
        }
        "float" | "Float" | "f32" => Builtin::Number(NumericKind::Float),
        "double" | "Double" | "f64" => Builtin::Number(NumericKind::Double),
        "BigDecimal" | "BigInteger" | "Number" | "i128" | "u128" => {
            Builtin::Number(NumericKind::Decimal)
        }
        "boolean" | "Boolean" | "bool" | "AtomicBoolean" => Builtin::Boolean,
        "String" | "char" | "Character" | "CharSequence" | "str" => Builtin::Text,
        "void" | "Void" | "()" | "Unit" => Builtin::Void,
        "Date" | "LocalDate" | "LocalDateTime" | "LocalTime" | "Instant" | "OffsetDateTime"
        | "ZonedDateTime" | "Timestamp" | "Calendar" | "DateTime" | "NaiveDate"
        | "NaiveDateTime" | "SystemTime" => Builtin::DateTime,
        "ByteBuffer" | "ByteBuf" | "DataBuffer" | "Bytes" => Builtin::Binary,
        "List" | "ArrayList" | "LinkedList" | "Set" | "HashSet" | "TreeSet" | "LinkedHashSet"
        | "SortedSet" | "Collection" | "Iterable" | "Vec" | "VecDeque" | "BTreeSet" => {
            Builtin::Collection
        }
        "Optional" | "Option" => Builtin::Optional,
        "Mono" | "CompletableFuture" | "CompletionStage" | "Future" | "Single" | "Maybe" => {
            Builtin::Single
        }
        "Flux" | "Publisher" | "Flowable" | "Observable" => Builtin::Stream,
        _ => return None,
    };
    Some(found)
}

/// Resolves parsed expressions against built-in names and known records.
///
/// Lookup order: exact record identity, built-in simple name, record simple
/// name, then a fresh record identity for anything else.
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    records: Vec<RecordId>,
}

impl TypeResolver {
    /// Creates a resolver that knows the given record identities.
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = RecordId>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Parses and resolves a type expression.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTypeExpression` if the text does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use rsocket_export_core::{RecordId, TypeDescriptor};
    /// use rsocket_export_introspector::TypeResolver;
    ///
    /// let resolver = TypeResolver::new([RecordId::new("org.demo.Account")]);
    /// let ty = resolver.resolve_str("Flux<Account>").unwrap();
    /// assert_eq!(ty, TypeDescriptor::stream(TypeDescriptor::record("org.demo.Account")));
    /// ```
    pub fn resolve_str(&self, expression: &str) -> Result<TypeDescriptor> {
        let expr = TypeExpr::parse(expression)?;
        Ok(self.resolve(&expr))
    }

    /// Resolves a parsed expression. Never fails.
    #[must_use]
    pub fn resolve(&self, expr: &TypeExpr) -> TypeDescriptor {
        if expr.array_dims > 0 {
            let element = TypeExpr {
                name: expr.name.clone(),
                args: expr.args.clone(),
                array_dims: expr.array_dims - 1,
            };
            if element.array_dims == 0
                && element.args.is_empty()
                && matches!(element.simple_name(), "byte" | "Byte" | "u8")
            {
                return TypeDescriptor::Binary;
            }
            return TypeDescriptor::list(self.resolve(&element));
        }

        if let Some(id) = self.records.iter().find(|id| id.as_str() == expr.name) {
            return TypeDescriptor::Record(id.clone());
        }

        if let Some(kind) = builtin(expr.simple_name()) {
            return self.resolve_builtin(kind, expr);
        }

        let simple = expr.simple_name();
        self.records
            .iter()
            .find(|id| id.simple_name() == simple)
            .map_or_else(
                || TypeDescriptor::record(expr.name.clone()),
                |id| TypeDescriptor::Record(id.clone()),
            )
    }

    fn resolve_builtin(&self, kind: Builtin, expr: &TypeExpr) -> TypeDescriptor {
        match kind {
            Builtin::Number(width) => TypeDescriptor::Number(width),
            Builtin::Boolean => TypeDescriptor::Boolean,
            Builtin::Text => TypeDescriptor::Text,
            Builtin::Void => TypeDescriptor::Void,
            Builtin::DateTime => TypeDescriptor::DateTime,
            Builtin::Binary => TypeDescriptor::Binary,
            Builtin::Collection => {
                let element = self.first_argument(expr);
                if matches!(element, TypeDescriptor::Number(NumericKind::Byte))
                    && expr.simple_name() == "Vec"
                {
                    TypeDescriptor::Binary
                } else {
                    TypeDescriptor::list(element)
                }
            }
            Builtin::Optional => self.first_argument(expr),
            Builtin::Single => TypeDescriptor::single(self.first_argument(expr)),
            Builtin::Stream => TypeDescriptor::stream(self.first_argument(expr)),
        }
    }

    fn first_argument(&self, expr: &TypeExpr) -> TypeDescriptor {
        expr.args.first().map_or_else(
            || TypeDescriptor::record("java.lang.Object"),
            |arg| self.resolve(arg),
        )
    }
}
