//! # Parameter Normalization
//!
//! Every registered command names one [`Rule`]. The rule decides which [`Args`] shapes the
//! command accepts and how they are coerced into the canonical [`Params`] mapping.
use crate::args::{Args, Identifier, Params};
use serde_json::Value;

pub const IDS_KEY: &str = "ids";
pub const NAMES_KEY: &str = "names";
pub const PERMISSIVE_KEY: &str = "permissive";

/// How a command turns caller arguments into canonical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The command takes no parameters; only [`Args::Absent`] is accepted.
    NoParams,
    /// The caller must pass a ready-made mapping.
    Mapping,
    /// The caller's mapping is forwarded as is; nothing at all becomes `{}`.
    ///
    /// Used for commands whose parameter contract is left to the caller.
    Passthrough,
    /// Identifiers become `{ids: [...]}`; a mapping is forwarded as is.
    Ids,
    /// Like [`Rule::Ids`], but a mapping must carry an explicit `ids` key.
    IdsRequired,
    /// Numeric identifiers become `{ids: [...]}` and names become `{names: [...]}`.
    ///
    /// Nothing at all becomes `{}`. A list must be uniformly numeric or uniformly named.
    IdsOrNames,
}

/// Why a set of arguments was rejected by a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("this command takes no parameters")]
    Unexpected,
    #[error("parameters are required")]
    Missing,
    #[error("a parameter mapping is required")]
    MappingRequired,
    #[error("the parameter mapping must contain an 'ids' key")]
    IdsKeyRequired,
    #[error("identifiers must be either all numeric ids or all names")]
    MixedIdentifiers,
}

impl Rule {
    pub fn apply(self, args: Args) -> Result<Params, ShapeError> {
        match (self, args) {
            (Rule::NoParams, Args::Absent) => Ok(Params::new()),
            (Rule::NoParams, Args::Mapping(params)) if params.is_empty() => Ok(params),
            (Rule::NoParams, _) => Err(ShapeError::Unexpected),

            (Rule::Mapping, Args::Mapping(params)) => Ok(params),
            (Rule::Mapping, _) => Err(ShapeError::MappingRequired),

            (Rule::Passthrough, Args::Absent) => Ok(Params::new()),
            (Rule::Passthrough, Args::Mapping(params)) => Ok(params),
            (Rule::Passthrough, _) => Err(ShapeError::MappingRequired),

            (Rule::Ids | Rule::IdsRequired, Args::Absent) => Err(ShapeError::Missing),
            (Rule::IdsRequired, Args::Mapping(params)) if !params.contains_key(IDS_KEY) => {
                Err(ShapeError::IdsKeyRequired)
            }
            (Rule::Ids | Rule::IdsRequired, Args::Mapping(params)) => Ok(params),
            (Rule::Ids | Rule::IdsRequired, Args::Identifier(id)) => {
                Ok(keyed(IDS_KEY, vec![id]))
            }
            (Rule::Ids | Rule::IdsRequired, Args::Identifiers(ids)) => Ok(keyed(IDS_KEY, ids)),

            (Rule::IdsOrNames, Args::Absent) => Ok(Params::new()),
            (Rule::IdsOrNames, Args::Mapping(params)) => Ok(params),
            (Rule::IdsOrNames, Args::Identifier(id)) => {
                let key = if id.is_numeric() { IDS_KEY } else { NAMES_KEY };
                Ok(keyed(key, vec![id]))
            }
            (Rule::IdsOrNames, Args::Identifiers(ids)) => {
                if ids.iter().all(Identifier::is_numeric) {
                    Ok(keyed(IDS_KEY, ids))
                } else if ids.iter().all(|id| !id.is_numeric()) {
                    Ok(keyed(NAMES_KEY, ids))
                } else {
                    Err(ShapeError::MixedIdentifiers)
                }
            }
        }
    }
}

fn keyed(key: &str, identifiers: Vec<Identifier>) -> Params {
    let values = identifiers.into_iter().map(Value::from).collect();
    let mut params = Params::new();
    params.insert(key.to_string(), Value::Array(values));
    params
}
