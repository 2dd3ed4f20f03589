//! # API Groups
//!
//! One handler per Bugzilla WebService API group. Each group module declares its external
//! name (`GROUP`) and its registration table (`COMMANDS`), and exposes typed methods that are
//! thin wrappers over the generic `call` dispatcher.
//!
//! Groups other than [`server_info`] hold a [`server_info::ServerInfo`] handler and fall back to
//! it for operations they do not register themselves, so `client.bug().call("version", ..)`
//! works just like `client.bugzilla().version()`.
pub mod bug;
pub mod product;
pub mod server_info;
pub mod user;

use crate::{
    api::{self, CallError, CommandSpec},
    args::Args,
    transport::Transport,
};
use serde_json::Value;
use server_info::ServerInfo;

/// Dispatcher shared by every group that delegates to [`ServerInfo`].
pub(crate) struct Facade<T> {
    group: &'static str,
    commands: &'static [CommandSpec],
    server_info: ServerInfo<T>,
}

impl<T: Transport> Facade<T> {
    pub(crate) fn new(
        group: &'static str,
        commands: &'static [CommandSpec],
        server_info: ServerInfo<T>,
    ) -> Self {
        Self {
            group,
            commands,
            server_info,
        }
    }

    /// Resolves `operation` in the group's own table first, then in the server information table.
    pub(crate) async fn call(&self, operation: &str, args: Args) -> Result<Value, CallError> {
        let spec = api::resolve(self.commands, operation)
            .or_else(|| api::resolve(server_info::COMMANDS, operation))
            .ok_or_else(|| CallError::unknown(self.group, operation))?;

        self.server_info.invoke(spec, args).await
    }

    pub(crate) fn server_info(&self) -> &ServerInfo<T> {
        &self.server_info
    }
}
