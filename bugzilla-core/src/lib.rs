//! # Bugzilla Core
//!
//! `bugzilla-core` is the library powering the `bugzilla` CLI. It gives callers a small,
//! consistent interface to the Bugzilla WebService API while taking care of three things:
//!
//! * **Dispatch**: symbolic operations (`history`, `get_selectable_products`) are resolved
//!   through per-group registration tables to remote commands (`Bug.history`).
//! * **Capability gating**: commands that need a minimum Bugzilla release check the server
//!   version first and fail locally with [`api::CallError::UnsupportedByServerVersion`]
//!   instead of sending a call the server does not understand.
//! * **Normalization**: a single id, a list of ids or names, or a full mapping are coerced
//!   into the canonical parameter mapping of each command.
//!
//! ## Key Components
//!
//! * **[`client::BugzillaClient`]:** The main entry point, handing out one handler per API group.
//! * **[`args::Args`]:** The argument shapes accepted by every operation.
//! * **[`transport::Transport`]:** The seam to the wire. [`transport::json_rpc::JsonRpcTransport`]
//!   talks to a real installation over HTTP(S).
//!
//! ## Re-exports
//!
//! This crate re-exports `serde_json`, since parameters and responses are `serde_json` values.
pub mod api;
pub mod args;
pub mod client;
pub mod credentials;
pub mod groups;
pub mod normalize;
pub mod transport;
pub mod version;

// Re-exports
pub use serde_json;
