//! # Call Arguments
//!
//! Callers may hand an operation a single identifier, a list of identifiers, a fully
//! specified parameter mapping, or nothing at all. [`Args`] is the closed set of those shapes;
//! each command's normalization rule turns it into the canonical [`Params`] mapping that is
//! sent over the wire.
use serde_json::Value;

/// The canonical parameter mapping of a Bugzilla WebService call.
pub type Params = serde_json::Map<String, Value>;

/// A single bug, product or field identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// A numeric id (e.g. bug `618271`).
    Id(u64),
    /// A name or alias (e.g. field `"bug_status"`, bug alias `"CVE-2010-1234"`).
    Name(String),
}

impl Identifier {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Id(_))
    }

    /// Interprets a command line token: digits become an [`Identifier::Id`], anything else a name.
    pub fn parse_token(token: &str) -> Self {
        token
            .parse::<u64>()
            .map(Identifier::Id)
            .unwrap_or_else(|_| Identifier::Name(token.to_string()))
    }
}

impl From<u64> for Identifier {
    fn from(id: u64) -> Self {
        Identifier::Id(id)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(name)
    }
}

impl From<Identifier> for Value {
    fn from(identifier: Identifier) -> Self {
        match identifier {
            Identifier::Id(id) => Value::from(id),
            Identifier::Name(name) => Value::String(name),
        }
    }
}

/// The argument shapes accepted by every operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Args {
    #[default]
    Absent,
    Identifier(Identifier),
    Identifiers(Vec<Identifier>),
    Mapping(Params),
}

/// Returned by [`Args::from_json`] when a JSON value has no matching argument shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("JSON value '{0}' is neither an identifier, a list of identifiers nor an object")]
pub struct UnsupportedJsonShape(pub Value);

impl Args {
    pub fn ids<I, T>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identifier>,
    {
        Args::Identifiers(identifiers.into_iter().map(Into::into).collect())
    }

    /// Classifies an arbitrary JSON value.
    ///
    /// * `null` becomes [`Args::Absent`].
    /// * An unsigned integer or a string becomes a single [`Args::Identifier`].
    /// * An array whose elements are all unsigned integers or strings becomes [`Args::Identifiers`].
    /// * An object becomes [`Args::Mapping`].
    pub fn from_json(value: Value) -> Result<Self, UnsupportedJsonShape> {
        match value {
            Value::Null => Ok(Args::Absent),
            Value::Object(map) => Ok(Args::Mapping(map)),
            Value::Array(items) => {
                let identifiers = items
                    .iter()
                    .map(identifier_from_json)
                    .collect::<Option<Vec<_>>>();

                match identifiers {
                    Some(identifiers) => Ok(Args::Identifiers(identifiers)),
                    None => Err(UnsupportedJsonShape(Value::Array(items))),
                }
            }
            other => match identifier_from_json(&other) {
                Some(identifier) => Ok(Args::Identifier(identifier)),
                None => Err(UnsupportedJsonShape(other)),
            },
        }
    }
}

fn identifier_from_json(value: &Value) -> Option<Identifier> {
    match value {
        Value::Number(n) => n.as_u64().map(Identifier::Id),
        Value::String(s) => Some(Identifier::Name(s.clone())),
        _ => None,
    }
}

impl From<u64> for Args {
    fn from(id: u64) -> Self {
        Args::Identifier(Identifier::Id(id))
    }
}

impl From<&str> for Args {
    fn from(name: &str) -> Self {
        Args::Identifier(Identifier::from(name))
    }
}

impl From<Identifier> for Args {
    fn from(identifier: Identifier) -> Self {
        Args::Identifier(identifier)
    }
}

impl From<Vec<Identifier>> for Args {
    fn from(identifiers: Vec<Identifier>) -> Self {
        Args::Identifiers(identifiers)
    }
}

impl From<Params> for Args {
    fn from(params: Params) -> Self {
        Args::Mapping(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_json_values() {
        assert_eq!(Args::from_json(Value::Null), Ok(Args::Absent));
        assert_eq!(Args::from_json(json!(42)), Ok(Args::from(42_u64)));
        assert_eq!(Args::from_json(json!("foo")), Ok(Args::from("foo")));
        assert_eq!(
            Args::from_json(json!([1, "a"])),
            Ok(Args::Identifiers(vec![
                Identifier::Id(1),
                Identifier::Name("a".into())
            ]))
        );

        let Ok(Args::Mapping(map)) = Args::from_json(json!({ "ids": [5] })) else {
            panic!("Expected a mapping");
        };
        assert_eq!(map["ids"], json!([5]));
    }

    #[test]
    fn rejects_unsupported_json_values() {
        assert!(Args::from_json(json!(true)).is_err());
        assert!(Args::from_json(json!(-3)).is_err());
        assert!(Args::from_json(json!(1.5)).is_err());
        assert!(Args::from_json(json!([1, null])).is_err());
    }

    #[test]
    fn parses_command_line_tokens() {
        assert_eq!(Identifier::parse_token("618271"), Identifier::Id(618271));
        assert_eq!(
            Identifier::parse_token("CVE-2010-1234"),
            Identifier::Name("CVE-2010-1234".into())
        );
    }
}
