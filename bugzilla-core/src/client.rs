//! # Bugzilla Client
//!
//! [`BugzillaClient`] is the entry point of the crate. It owns the [`Transport`] and the
//! optional login, and hands out one handler per WebService API group:
//!
//! * [`BugzillaClient::bugzilla`]: general server information (`Bugzilla.*`).
//! * [`BugzillaClient::product`]: product listing (`Product.*`).
//! * [`BugzillaClient::bug`]: bug retrieval and search (`Bug.*`).
//! * [`BugzillaClient::user`]: accounts and sessions (`User.*`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use bugzilla_core::client::BugzillaClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BugzillaClient::connect("bugzilla.redhat.com", 443)?;
//!
//! let history = client.bug().history(618271_u64).await?;
//! let products = client.product().selectable_products().await?;
//!
//! // Every group also answers server information queries.
//! let version = client.bug().call("version", Default::default()).await?;
//! # Ok(())
//! # }
//! ```
use crate::{
    api::CallError,
    args::{Args, Params},
    credentials::{self, Credentials},
    groups::{
        bug::{self, Bug},
        product::{self, Product},
        server_info::{self, ServerInfo},
        user::{self, User},
    },
    transport::{Transport, TransportError, json_rpc::JsonRpcTransport},
};
use serde_json::Value;
use std::sync::Arc;

/// The transport and login shared by every group handler of a client.
pub(crate) struct Session<T> {
    transport: Arc<T>,
    credentials: Option<Arc<Credentials>>,
}

impl<T> Clone for Session<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            credentials: self.credentials.clone(),
        }
    }
}

impl<T: Transport> Session<T> {
    pub(crate) async fn send(&self, command: &str, params: Params) -> Result<Value, TransportError> {
        let params = credentials::inject(params, self.credentials.as_deref());
        self.transport.send(command, params).await
    }
}

pub struct BugzillaClient<T = JsonRpcTransport> {
    session: Session<T>,
}

impl BugzillaClient<JsonRpcTransport> {
    /// Creates a client talking JSON-RPC to the Bugzilla installation on `server`.
    ///
    /// Port `443` selects HTTPS; any other port selects plain HTTP.
    pub fn connect(server: &str, port: u16) -> Result<Self, TransportError> {
        Ok(Self::new(JsonRpcTransport::new(server, port)?))
    }
}

impl<T: Transport> BugzillaClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            session: Session {
                transport: Arc::new(transport),
                credentials: None,
            },
        }
    }

    /// Attaches a login to every subsequent call made through this client.
    ///
    /// Credentials with an empty login or password are never sent.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.session.credentials = Some(Arc::new(credentials));
        self
    }

    pub fn bugzilla(&self) -> ServerInfo<T> {
        ServerInfo::new(self.session.clone())
    }

    pub fn product(&self) -> Product<T> {
        Product::new(self.bugzilla())
    }

    pub fn bug(&self) -> Bug<T> {
        Bug::new(self.bugzilla())
    }

    pub fn user(&self) -> User<T> {
        User::new(self.bugzilla())
    }

    /// Dispatches a fully qualified operation such as `Bug.history`.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw server response.
    /// * `Err(CallError::UnknownOperation)` - If the group or the operation is not registered.
    /// * `Err(CallError)` - Any other dispatch failure.
    pub async fn call(&self, qualified: &str, args: Args) -> Result<Value, CallError> {
        let (group, operation) = qualified
            .split_once('.')
            .ok_or_else(|| CallError::unknown("", qualified))?;

        match group {
            server_info::GROUP => self.bugzilla().call(operation, args).await,
            product::GROUP => self.product().call(operation, args).await,
            bug::GROUP => self.bug().call(operation, args).await,
            user::GROUP => self.user().call(operation, args).await,
            _ => Err(CallError::unknown(group, operation)),
        }
    }
}
