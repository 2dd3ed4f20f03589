//! # CLI
//!
//! This module defines the command-line interface of `bugzilla` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring an
//! operation is written as `Group.operation` and that `--params` is valid JSON).
use bugzilla_core::args::{Args, Identifier};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bugzilla", version, about = "Bugzilla WebService CLI")]
pub struct Cli {
    /// Host name of the Bugzilla installation (e.g. bugzilla.redhat.com)
    pub server: String,

    /// Port of the installation; 443 uses HTTPS, anything else plain HTTP
    #[arg(short, long, default_value_t = 443)]
    pub port: u16,

    /// Login sent with every call (requires --password)
    #[arg(long, env = "BUGZILLA_LOGIN")]
    pub login: Option<String>,

    /// Password sent with every call (requires --login)
    #[arg(long, env = "BUGZILLA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Perform any WebService call
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// bugzilla bugzilla.redhat.com call Bug.history --params '[618271]'
    /// bugzilla bugzilla.redhat.com call Bug.legal_values --params '{"field": "product"}'
    /// ```
    Call {
        /// Operation (Group.operation)
        #[arg(value_parser = parse_operation)]
        operation: String,
        /// JSON arguments: an id, a name, a list of them, or an object
        #[arg(long, value_parser = parse_params)]
        params: Option<Args>,
    },

    /// Show the Bugzilla release of the server
    Version,

    /// List the installed extensions (Bugzilla 3.2+)
    Extensions,

    /// Show the timezone the server expects dates in
    Timezone,

    /// Show the server clock (Bugzilla 3.4+)
    Time,

    /// List products with their full records
    Products {
        #[arg(value_enum, default_value_t = ProductListing::Accessible)]
        listing: ProductListing,
    },

    /// Inspect bugs
    Bug {
        #[command(subcommand)]
        sub: BugCommands,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProductListing {
    /// Products you can search on
    Selectable,
    /// Products you can file bugs against
    Enterable,
    /// Products you can search or file bugs against
    Accessible,
}

#[derive(Subcommand)]
pub enum BugCommands {
    /// Fetch bugs by id or alias
    Get {
        #[arg(required = true, value_parser = parse_identifier)]
        ids: Vec<Identifier>,
    },
    /// Show the change history of bugs (Bugzilla 3.4+)
    History {
        #[arg(required = true, value_parser = parse_identifier)]
        ids: Vec<Identifier>,
    },
    /// Show the comments of bugs (Bugzilla 3.4+)
    Comments {
        #[arg(required = true, value_parser = parse_identifier)]
        ids: Vec<Identifier>,
    },
    /// Show the attachments of bugs (Bugzilla 3.6+)
    Attachments {
        #[arg(required = true, value_parser = parse_identifier)]
        ids: Vec<Identifier>,
    },
    /// Describe bug fields, all of them when none is given (Bugzilla 3.6+)
    Fields {
        #[arg(value_parser = parse_identifier)]
        fields: Vec<Identifier>,
    },
}

fn parse_operation(value: &str) -> Result<String, String> {
    let (group, operation) = value.split_once('.').ok_or_else(|| {
        format!("Invalid operation format: '{value}'. Expected 'Group.operation'")
    })?;

    if group.trim().is_empty() || operation.trim().is_empty() {
        return Err("Group and operation names cannot be empty".to_string());
    }

    Ok(value.to_string())
}

fn parse_params(value: &str) -> Result<Args, String> {
    let json = serde_json::from_str(value).map_err(|e| format!("Invalid JSON: {e}"))?;
    Args::from_json(json).map_err(|e| e.to_string())
}

fn parse_identifier(value: &str) -> Result<Identifier, String> {
    if value.trim().is_empty() {
        return Err("Identifiers cannot be empty".to_string());
    }
    Ok(Identifier::parse_token(value.trim()))
}
