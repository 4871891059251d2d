//! Match expressions identifying the subjects to mutate.
//!
//! The textual grammar:
//!
//! | syntax         | meaning                                           |
//! |----------------|---------------------------------------------------|
//! | `Foo::Bar#baz` | instance method `baz` of `Foo::Bar`               |
//! | `Foo::Bar.baz` | singleton method `baz` of `Foo::Bar`              |
//! | `Foo::Bar#`    | all instance methods of `Foo::Bar`                |
//! | `Foo::Bar.`    | all singleton methods of `Foo::Bar`               |
//! | `Foo::Bar`     | exactly the namespace `Foo::Bar`                  |
//! | `Foo::Bar*`    | `Foo::Bar` and every namespace nested below it    |

use std::fmt;

use serde::{Serialize, Serializer};

/// Separator between constant names in a scope.
const SCOPE_SEPARATOR: &str = "::";

/// Operator method names accepted after a scope symbol.
const OPERATOR_METHODS: &[&str] = &[
    "<=>", "===", "[]=", "[]", "**", "==", "!=", "=~", "!~", "<=", ">=", "<<", ">>", "+@", "-@",
    "+", "-", "*", "/", "%", "<", ">", "&", "|", "^", "~", "!",
];

/// Error returned for text that is not a valid expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Expression: {0:?} is not valid")]
pub struct InvalidExpression(pub String);

/// Whether a method expression targets instance or singleton methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Instance methods, written with `#`.
    Instance,
    /// Singleton methods, written with `.`.
    Singleton,
}

impl MethodKind {
    /// Returns the scope symbol used in the textual syntax.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Instance => '#',
            Self::Singleton => '.',
        }
    }

    const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' => Some(Self::Instance),
            '.' => Some(Self::Singleton),
            _ => None,
        }
    }
}

/// A parsed match expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// A single method.
    Method {
        scope: String,
        kind: MethodKind,
        name: String,
    },
    /// Every method of one kind in a scope.
    Methods { scope: String, kind: MethodKind },
    /// Exactly one namespace.
    ExactNamespace { scope: String },
    /// A namespace and everything nested below it.
    RecursiveNamespace { scope: String },
}

impl Expression {
    /// Parses an expression from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidExpression`] when `input` matches none of the
    /// supported forms.
    pub fn parse(input: &str) -> Result<Self, InvalidExpression> {
        let invalid = || InvalidExpression(input.to_owned());

        if let Some(index) = input.find(['#', '.']) {
            let (scope, rest) = input.split_at(index);
            let mut chars = rest.chars();
            let kind = chars
                .next()
                .and_then(MethodKind::from_symbol)
                .ok_or_else(invalid)?;
            let name = chars.as_str();

            if !is_scope_name(scope) {
                return Err(invalid());
            }
            if name.is_empty() {
                return Ok(Self::Methods {
                    scope: scope.to_owned(),
                    kind,
                });
            }
            if !is_method_name(name) {
                return Err(invalid());
            }
            return Ok(Self::Method {
                scope: scope.to_owned(),
                kind,
                name: name.to_owned(),
            });
        }

        if let Some(scope) = input.strip_suffix('*') {
            return if is_scope_name(scope) {
                Ok(Self::RecursiveNamespace {
                    scope: scope.to_owned(),
                })
            } else {
                Err(invalid())
            };
        }

        if is_scope_name(input) {
            Ok(Self::ExactNamespace {
                scope: input.to_owned(),
            })
        } else {
            Err(invalid())
        }
    }

    /// Returns the scope name this expression refers to.
    #[must_use]
    pub fn scope(&self) -> &str {
        match self {
            Self::Method { scope, .. }
            | Self::Methods { scope, .. }
            | Self::ExactNamespace { scope }
            | Self::RecursiveNamespace { scope } => scope.as_str(),
        }
    }

    /// Returns true if the subject identified by `subject` is selected by
    /// this expression.
    #[must_use]
    pub fn matches(&self, subject: &Self) -> bool {
        match self {
            Self::Method { .. } => self == subject,
            Self::Methods { scope, kind } => match subject {
                Self::Method {
                    scope: subject_scope,
                    kind: subject_kind,
                    ..
                }
                | Self::Methods {
                    scope: subject_scope,
                    kind: subject_kind,
                } => scope == subject_scope && kind == subject_kind,
                _ => false,
            },
            Self::ExactNamespace { scope } => subject.scope() == scope.as_str(),
            Self::RecursiveNamespace { scope } => {
                let subject_scope = subject.scope();
                subject_scope == scope.as_str()
                    || subject_scope
                        .strip_prefix(scope.as_str())
                        .is_some_and(|rest| rest.starts_with(SCOPE_SEPARATOR))
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method { scope, kind, name } => write!(f, "{scope}{}{name}", kind.symbol()),
            Self::Methods { scope, kind } => write!(f, "{scope}{}", kind.symbol()),
            Self::ExactNamespace { scope } => f.write_str(scope),
            Self::RecursiveNamespace { scope } => write!(f, "{scope}*"),
        }
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn is_scope_name(scope: &str) -> bool {
    !scope.is_empty() && scope.split(SCOPE_SEPARATOR).all(is_constant_name)
}

fn is_constant_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_method_name(name: &str) -> bool {
    if OPERATOR_METHODS.contains(&name) {
        return true;
    }

    let body = name.strip_suffix(['?', '!', '=']).unwrap_or(name);
    let mut chars = body.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expression {
        Expression::parse(input).unwrap()
    }

    #[test]
    fn parses_recursive_namespace() {
        assert_eq!(
            parse("TestApp*"),
            Expression::RecursiveNamespace {
                scope: "TestApp".to_string()
            }
        );
    }

    #[test]
    fn parses_exact_namespace() {
        assert_eq!(
            parse("Foo::Bar"),
            Expression::ExactNamespace {
                scope: "Foo::Bar".to_string()
            }
        );
    }

    #[test]
    fn parses_instance_method() {
        assert_eq!(
            parse("Foo::Bar#baz?"),
            Expression::Method {
                scope: "Foo::Bar".to_string(),
                kind: MethodKind::Instance,
                name: "baz?".to_string(),
            }
        );
    }

    #[test]
    fn parses_singleton_operator_method() {
        assert_eq!(
            parse("Foo.<=>"),
            Expression::Method {
                scope: "Foo".to_string(),
                kind: MethodKind::Singleton,
                name: "<=>".to_string(),
            }
        );
    }

    #[test]
    fn parses_multiplication_operator_without_treating_it_as_recursive() {
        assert_eq!(
            parse("Foo#*"),
            Expression::Method {
                scope: "Foo".to_string(),
                kind: MethodKind::Instance,
                name: "*".to_string(),
            }
        );
    }

    #[test]
    fn parses_all_methods_of_a_scope() {
        assert_eq!(
            parse("Foo."),
            Expression::Methods {
                scope: "Foo".to_string(),
                kind: MethodKind::Singleton,
            }
        );
    }

    #[test]
    fn rejects_invalid_input() {
        for input in ["", "foo", "Foo::", "::Foo", "Foo#1bar", "Foo-Bar", "Foo#bar#baz", "*"] {
            assert_eq!(
                Expression::parse(input),
                Err(InvalidExpression(input.to_string())),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_expression_message_quotes_input() {
        let error = Expression::parse("foo").unwrap_err();
        assert_eq!(error.to_string(), "Expression: \"foo\" is not valid");
    }

    #[test]
    fn display_renders_canonical_syntax() {
        for input in ["TestApp*", "Foo::Bar", "Foo#bar=", "Foo.", "Foo::Bar.baz"] {
            assert_eq!(parse(input).to_string(), input);
        }
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&parse("Foo::Bar#baz")).unwrap();
        assert_eq!(json, "\"Foo::Bar#baz\"");
    }

    #[test]
    fn recursive_namespace_matches_nested_scopes() {
        let expression = parse("Foo*");

        assert!(expression.matches(&parse("Foo")));
        assert!(expression.matches(&parse("Foo::Bar#baz")));
        assert!(!expression.matches(&parse("FooBar")));
        assert!(!expression.matches(&parse("Bar::Foo")));
    }

    #[test]
    fn exact_namespace_matches_only_its_scope() {
        let expression = parse("Foo::Bar");

        assert!(expression.matches(&parse("Foo::Bar#baz")));
        assert!(expression.matches(&parse("Foo::Bar.baz")));
        assert!(!expression.matches(&parse("Foo::Bar::Baz#qux")));
    }

    #[test]
    fn methods_match_by_scope_and_kind() {
        let expression = parse("Foo#");

        assert!(expression.matches(&parse("Foo#bar")));
        assert!(!expression.matches(&parse("Foo.bar")));
        assert!(!expression.matches(&parse("Foo")));
    }

    #[test]
    fn method_matches_only_itself() {
        let expression = parse("Foo#bar");

        assert!(expression.matches(&parse("Foo#bar")));
        assert!(!expression.matches(&parse("Foo#baz")));
    }
}
