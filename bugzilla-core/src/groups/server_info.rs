//! # Bugzilla API
//!
//! `Bugzilla.*` commands tell you about the installation itself. The group also hosts the
//! capability gate: [`ServerInfo::check_version`] and [`ServerInfo::require_version`] compare
//! the release reported by `Bugzilla.version` against a command's minimum.
//!
//! See <https://www.bugzilla.org/docs/tip/en/html/api/Bugzilla/WebService/Bugzilla.html>
use crate::{
    api::{self, CallError, CommandSpec},
    args::{Args, Params},
    client::Session,
    normalize::Rule,
    transport::Transport,
    version::Version,
};
use serde_json::Value;
use tracing::{debug, warn};

pub const GROUP: &str = "Bugzilla";

const VERSION_COMMAND: &str = "Bugzilla.version";

pub(crate) const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(GROUP, "version", Rule::NoParams),
    CommandSpec::new(GROUP, "extensions", Rule::NoParams).since(Version::new(3, 2)),
    CommandSpec::new(GROUP, "timezone", Rule::NoParams),
    CommandSpec::new(GROUP, "time", Rule::NoParams).since(Version::new(3, 4)),
];

/// Outcome of a version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    pub satisfied: bool,
    /// The version string reported by the server, empty if it reported none.
    pub current: String,
}

pub struct ServerInfo<T> {
    session: Session<T>,
}

impl<T: Transport> ServerInfo<T> {
    pub(crate) fn new(session: Session<T>) -> Self {
        Self { session }
    }

    pub async fn call(&self, operation: &str, args: Args) -> Result<Value, CallError> {
        let spec = api::resolve(COMMANDS, operation)
            .ok_or_else(|| CallError::unknown(GROUP, operation))?;

        self.invoke(spec, args).await
    }

    pub(crate) async fn invoke(&self, spec: &CommandSpec, args: Args) -> Result<Value, CallError> {
        api::invoke(spec, args, &self.session, self).await
    }

    /// Queries the server version and compares it against `minimum`.
    ///
    /// The version is fetched anew on every check. A response without a parsable `version`
    /// member never satisfies the check.
    pub async fn check_version(&self, minimum: Version) -> Result<VersionCheck, CallError> {
        let response = self.session.send(VERSION_COMMAND, Params::new()).await?;

        let current = response
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let satisfied = match current.parse::<Version>() {
            Ok(version) => version >= minimum,
            Err(err) => {
                warn!(%err, "server reported an unparsable version");
                false
            }
        };

        debug!(%current, %minimum, satisfied, "checked Bugzilla version");
        Ok(VersionCheck { satisfied, current })
    }

    /// Fails with [`CallError::UnsupportedByServerVersion`] unless the server runs at least
    /// `minimum`.
    pub async fn require_version(&self, command: &str, minimum: Version) -> Result<(), CallError> {
        let check = self.check_version(minimum).await?;
        if check.satisfied {
            return Ok(());
        }

        Err(CallError::UnsupportedByServerVersion {
            command: command.to_string(),
            current: check.current,
            required: minimum,
        })
    }

    /// `Bugzilla.version`: the release the server is running.
    pub async fn version(&self) -> Result<Value, CallError> {
        self.call("version", Args::Absent).await
    }

    /// `Bugzilla.extensions`: installed and enabled extensions (3.2+).
    pub async fn extensions(&self) -> Result<Value, CallError> {
        self.call("extensions", Args::Absent).await
    }

    /// `Bugzilla.timezone`: the timezone Bugzilla expects dates and times in.
    pub async fn timezone(&self) -> Result<Value, CallError> {
        self.call("timezone", Args::Absent).await
    }

    /// `Bugzilla.time`: the server clock and its timezone (3.4+).
    pub async fn time(&self) -> Result<Value, CallError> {
        self.call("time", Args::Absent).await
    }
}
