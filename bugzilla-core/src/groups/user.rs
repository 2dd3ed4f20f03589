//! # User API
//!
//! `User.*` commands create accounts and log in or out with an existing one. Their parameter
//! mappings are forwarded as given.
//!
//! See <https://www.bugzilla.org/docs/tip/en/html/api/Bugzilla/WebService/User.html>
use super::{Facade, server_info::ServerInfo};
use crate::{
    api::{CallError, CommandSpec},
    args::{Args, Params},
    normalize::Rule,
    transport::Transport,
    version::Version,
};
use serde_json::Value;

pub const GROUP: &str = "User";

pub(crate) const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(GROUP, "login", Rule::Passthrough),
    CommandSpec::new(GROUP, "logout", Rule::Passthrough),
    CommandSpec::new(GROUP, "offer_account_by_email", Rule::Passthrough),
    CommandSpec::new(GROUP, "create", Rule::Passthrough),
    CommandSpec::new(GROUP, "get", Rule::Passthrough).since(Version::new(3, 4)),
];

pub struct User<T> {
    facade: Facade<T>,
}

impl<T: Transport> User<T> {
    pub(crate) fn new(server_info: ServerInfo<T>) -> Self {
        Self {
            facade: Facade::new(GROUP, COMMANDS, server_info),
        }
    }

    pub async fn call(&self, operation: &str, args: Args) -> Result<Value, CallError> {
        self.facade.call(operation, args).await
    }

    pub fn server_info(&self) -> &ServerInfo<T> {
        self.facade.server_info()
    }

    pub async fn login(&self, params: Params) -> Result<Value, CallError> {
        self.call("login", Args::Mapping(params)).await
    }

    pub async fn logout(&self) -> Result<Value, CallError> {
        self.call("logout", Args::Absent).await
    }

    pub async fn offer_account_by_email(&self, params: Params) -> Result<Value, CallError> {
        self.call("offer_account_by_email", Args::Mapping(params)).await
    }

    pub async fn create(&self, params: Params) -> Result<Value, CallError> {
        self.call("create", Args::Mapping(params)).await
    }

    /// `User.get` (3.4+).
    pub async fn get(&self, params: Params) -> Result<Value, CallError> {
        self.call("get", Args::Mapping(params)).await
    }
}
