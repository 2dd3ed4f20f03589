//! # Command Dispatch
//!
//! Every API group (`Bugzilla`, `Product`, `Bug`, `User`) registers its operations in a static
//! table of [`CommandSpec`]s. Dispatching an operation is a lookup in that table followed by a
//! fixed pipeline:
//!
//! 1. **Capability gate**: if the command has a minimum version, the server version is queried
//!    and the call is rejected locally when it is too old.
//! 2. **Normalization**: the caller's [`Args`] are coerced by the command's [`Rule`].
//! 3. **Permissive augmentation**: some commands add `permissive: true` when the server is
//!    recent enough to understand it.
//! 4. **Transport**: credentials are merged in and the command is sent as
//!    `"<GroupName>.<operationName>"`. The response is returned verbatim.
use crate::{
    args::Args,
    client::Session,
    groups::server_info::ServerInfo,
    normalize::{PERMISSIVE_KEY, Rule, ShapeError},
    transport::{Transport, TransportError},
    version::Version,
};
use serde_json::Value;
use tracing::debug;

/// Errors that can occur while dispatching an operation.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("No such Bugzilla API: {group}.{operation}")]
    UnknownOperation { group: String, operation: String },
    #[error("Invalid parameters for {command}: {source}")]
    InvalidParameters {
        command: String,
        #[source]
        source: ShapeError,
    },
    #[error("{command} is not supported in Bugzilla {current} (requires {required})")]
    UnsupportedByServerVersion {
        command: String,
        current: String,
        required: Version,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CallError {
    pub(crate) fn unknown(group: &str, operation: &str) -> Self {
        CallError::UnknownOperation {
            group: group.to_string(),
            operation: operation.to_string(),
        }
    }
}

/// The static description of one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// External name of the owning API group (e.g. `Bug`).
    pub group: &'static str,
    /// Operation name within the group (e.g. `history`).
    pub operation: &'static str,
    /// Oldest Bugzilla release that implements the command.
    pub min_version: Option<Version>,
    pub rule: Rule,
    /// Release from which `permissive: true` is added to the parameters.
    pub permissive_since: Option<Version>,
}

impl CommandSpec {
    pub const fn new(group: &'static str, operation: &'static str, rule: Rule) -> Self {
        Self {
            group,
            operation,
            min_version: None,
            rule,
            permissive_since: None,
        }
    }

    pub const fn since(self, version: Version) -> Self {
        Self {
            min_version: Some(version),
            ..self
        }
    }

    pub const fn permissive_since(self, version: Version) -> Self {
        Self {
            permissive_since: Some(version),
            ..self
        }
    }

    /// The remote command name, `"<GroupName>.<operationName>"`.
    pub fn command_name(&self) -> String {
        format!("{}.{}", self.group, self.operation)
    }
}

pub(crate) fn resolve(
    commands: &'static [CommandSpec],
    operation: &str,
) -> Option<&'static CommandSpec> {
    commands.iter().find(|spec| spec.operation == operation)
}

/// Runs the dispatch pipeline for an already resolved command.
pub(crate) async fn invoke<T: Transport>(
    spec: &CommandSpec,
    args: Args,
    session: &Session<T>,
    gate: &ServerInfo<T>,
) -> Result<Value, CallError> {
    let command = spec.command_name();

    if let Some(minimum) = spec.min_version {
        gate.require_version(&command, minimum).await?;
    }

    let mut params = spec
        .rule
        .apply(args)
        .map_err(|source| CallError::InvalidParameters {
            command: command.clone(),
            source,
        })?;

    if let Some(threshold) = spec.permissive_since
        && gate.check_version(threshold).await?.satisfied
    {
        params.insert(PERMISSIVE_KEY.to_string(), Value::Bool(true));
    }

    debug!(%command, "dispatching Bugzilla command");
    Ok(session.send(&command, params).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::{bug, product, server_info, user};
    use std::collections::HashSet;

    const TABLES: [&[CommandSpec]; 4] = [
        server_info::COMMANDS,
        product::COMMANDS,
        bug::COMMANDS,
        user::COMMANDS,
    ];

    #[test]
    fn composes_remote_command_names() {
        let spec = CommandSpec::new("Bug", "history", Rule::Ids);
        assert_eq!(spec.command_name(), "Bug.history");
    }

    #[test]
    fn builder_sets_versions() {
        let spec = CommandSpec::new("Bug", "get", Rule::Ids)
            .since(Version::new(3, 2))
            .permissive_since(Version::new(3, 4));

        assert_eq!(spec.min_version, Some(Version::new(3, 2)));
        assert_eq!(spec.permissive_since, Some(Version::new(3, 4)));
    }

    #[test]
    fn tables_have_unique_operations_within_their_group() {
        for table in TABLES {
            let group = table[0].group;
            let mut seen = HashSet::new();
            for spec in table {
                assert_eq!(spec.group, group);
                assert!(seen.insert(spec.operation), "duplicate {}", spec.command_name());
            }
        }
    }

    #[test]
    fn resolve_misses_unregistered_operations() {
        assert!(resolve(bug::COMMANDS, "history").is_some());
        assert!(resolve(bug::COMMANDS, "frobnicate").is_none());
        assert!(resolve(product::COMMANDS, "history").is_none());
    }

    #[test]
    fn registered_minimum_versions() {
        let min = |table: &'static [CommandSpec], op: &str| resolve(table, op).unwrap().min_version;

        assert_eq!(min(server_info::COMMANDS, "version"), None);
        assert_eq!(min(server_info::COMMANDS, "extensions"), Some(Version::new(3, 2)));
        assert_eq!(min(server_info::COMMANDS, "time"), Some(Version::new(3, 4)));
        assert_eq!(min(bug::COMMANDS, "fields"), Some(Version::new(3, 6)));
        assert_eq!(min(bug::COMMANDS, "attachments"), Some(Version::new(3, 6)));
        assert_eq!(min(bug::COMMANDS, "comments"), Some(Version::new(3, 4)));
        assert_eq!(min(bug::COMMANDS, "history"), Some(Version::new(3, 4)));
        assert_eq!(min(bug::COMMANDS, "search"), Some(Version::new(3, 4)));
        assert_eq!(min(bug::COMMANDS, "add_attachment"), Some(Version::new(4, 0)));
        assert_eq!(min(bug::COMMANDS, "add_comment"), Some(Version::new(3, 2)));
        assert_eq!(min(bug::COMMANDS, "update"), Some(Version::new(4, 0)));
        assert_eq!(min(bug::COMMANDS, "update_see_also"), Some(Version::new(3, 4)));
        assert_eq!(min(user::COMMANDS, "get"), Some(Version::new(3, 4)));
        assert_eq!(min(product::COMMANDS, "get"), None);
    }
}
