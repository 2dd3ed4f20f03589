//! # Bug API
//!
//! `Bug.*` commands file new bugs and retrieve information about existing ones.
//!
//! The read commands accept the loose argument shapes described in [`crate::args`]:
//! `bug.get(618271_u64)`, `bug.history(Args::ids([1_u64, 2]))` or a full mapping.
//! The write commands (`create`, `update`, ...) forward the caller's mapping untouched.
//!
//! See <https://www.bugzilla.org/docs/tip/en/html/api/Bugzilla/WebService/Bug.html>
use super::{Facade, server_info::ServerInfo};
use crate::{
    api::{CallError, CommandSpec},
    args::{Args, Params},
    normalize::Rule,
    transport::Transport,
    version::Version,
};
use serde_json::Value;

pub const GROUP: &str = "Bug";

pub(crate) const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(GROUP, "fields", Rule::IdsOrNames).since(Version::new(3, 6)),
    CommandSpec::new(GROUP, "legal_values", Rule::Mapping),
    CommandSpec::new(GROUP, "attachments", Rule::Mapping).since(Version::new(3, 6)),
    CommandSpec::new(GROUP, "comments", Rule::Mapping).since(Version::new(3, 4)),
    CommandSpec::new(GROUP, "get", Rule::Ids).permissive_since(Version::new(3, 4)),
    CommandSpec::new(GROUP, "history", Rule::Ids).since(Version::new(3, 4)),
    CommandSpec::new(GROUP, "search", Rule::Mapping).since(Version::new(3, 4)),
    CommandSpec::new(GROUP, "create", Rule::Passthrough),
    CommandSpec::new(GROUP, "add_attachment", Rule::Passthrough).since(Version::new(4, 0)),
    CommandSpec::new(GROUP, "add_comment", Rule::Passthrough).since(Version::new(3, 2)),
    CommandSpec::new(GROUP, "update", Rule::Passthrough).since(Version::new(4, 0)),
    CommandSpec::new(GROUP, "update_see_also", Rule::Passthrough).since(Version::new(3, 4)),
];

pub struct Bug<T> {
    facade: Facade<T>,
}

impl<T: Transport> Bug<T> {
    pub(crate) fn new(server_info: ServerInfo<T>) -> Self {
        Self {
            facade: Facade::new(GROUP, COMMANDS, server_info),
        }
    }

    /// Dispatches a `Bug` operation, or a `Bugzilla` one if this group does not define it.
    pub async fn call(&self, operation: &str, args: Args) -> Result<Value, CallError> {
        self.facade.call(operation, args).await
    }

    pub fn server_info(&self) -> &ServerInfo<T> {
        self.facade.server_info()
    }

    /// `Bug.fields` (3.6+): valid bug fields and their legal values.
    ///
    /// Accepts nothing (every field), a field id, a field name, a uniform list of either, or
    /// a mapping.
    pub async fn fields(&self, args: impl Into<Args>) -> Result<Value, CallError> {
        self.call("fields", args.into()).await
    }

    /// `Bug.legal_values`: allowed values for one field, e.g. `{"field": "product"}`.
    pub async fn legal_values(&self, params: Params) -> Result<Value, CallError> {
        self.call("legal_values", Args::Mapping(params)).await
    }

    /// `Bug.attachments` (3.6+).
    pub async fn attachments(&self, params: Params) -> Result<Value, CallError> {
        self.call("attachments", Args::Mapping(params)).await
    }

    /// `Bug.comments` (3.4+).
    pub async fn comments(&self, params: Params) -> Result<Value, CallError> {
        self.call("comments", Args::Mapping(params)).await
    }

    /// `Bug.get`: bugs by id or alias.
    ///
    /// On servers from 3.4 onwards `permissive: true` is added, so that inaccessible or
    /// missing bugs are reported in `faults` instead of failing the whole call.
    pub async fn get(&self, args: impl Into<Args>) -> Result<Value, CallError> {
        self.call("get", args.into()).await
    }

    /// `Bug.history` (3.4+): change history of bugs by id or alias.
    pub async fn history(&self, args: impl Into<Args>) -> Result<Value, CallError> {
        self.call("history", args.into()).await
    }

    /// `Bug.search` (3.4+).
    pub async fn search(&self, params: Params) -> Result<Value, CallError> {
        self.call("search", Args::Mapping(params)).await
    }

    pub async fn create(&self, params: Params) -> Result<Value, CallError> {
        self.call("create", Args::Mapping(params)).await
    }

    /// `Bug.add_attachment` (4.0+).
    pub async fn add_attachment(&self, params: Params) -> Result<Value, CallError> {
        self.call("add_attachment", Args::Mapping(params)).await
    }

    /// `Bug.add_comment` (3.2+).
    pub async fn add_comment(&self, params: Params) -> Result<Value, CallError> {
        self.call("add_comment", Args::Mapping(params)).await
    }

    /// `Bug.update` (4.0+).
    pub async fn update(&self, params: Params) -> Result<Value, CallError> {
        self.call("update", Args::Mapping(params)).await
    }

    /// `Bug.update_see_also` (3.4+).
    pub async fn update_see_also(&self, params: Params) -> Result<Value, CallError> {
        self.call("update_see_also", Args::Mapping(params)).await
    }
}
