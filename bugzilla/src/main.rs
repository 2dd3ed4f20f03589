//! # Bugzilla CLI Entry Point
//!
//! The main executable for the Bugzilla tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and sets up logging.
//! 2. **Connection**: Builds a JSON-RPC client for the target installation via `bugzilla_core`.
//! 3. **Execution**: Delegates the request to the matching API group handler.
//! 4. **Presentation**: Formats and prints the resulting data or error to standard output/error.

mod cli;
mod formatter;

use bugzilla_core::{
    api::CallError,
    args::{Args, Identifier, Params},
    client::BugzillaClient,
    credentials::Credentials,
    serde_json::Value,
};
use clap::Parser;
use cli::{BugCommands, Cli, Commands, ProductListing};
use formatter::{FormattedString, GenericError, ProductList};
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let credentials = match credentials(args.login, args.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            eprintln!("{}", FormattedString::from(GenericError("Invalid credentials", err)));
            process::exit(1);
        }
    };

    let client = connect_or_exit(&args.server, args.port, credentials);

    let output = match args.command {
        Commands::Call { operation, params } => client
            .call(&operation, params.unwrap_or_default())
            .await
            .map(FormattedString::from),
        Commands::Version => client.bugzilla().version().await.map(FormattedString::from),
        Commands::Extensions => client.bugzilla().extensions().await.map(FormattedString::from),
        Commands::Timezone => client.bugzilla().timezone().await.map(FormattedString::from),
        Commands::Time => client.bugzilla().time().await.map(FormattedString::from),
        Commands::Products { listing } => list_products(&client, listing).await,
        Commands::Bug { sub } => run_bug(&client, sub).await.map(FormattedString::from),
    };

    match output {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn credentials(
    login: Option<String>,
    password: Option<String>,
) -> anyhow::Result<Option<Credentials>> {
    match (&login, &password) {
        (Some(_), None) => anyhow::bail!("--login was given without --password"),
        (None, Some(_)) => anyhow::bail!("--password was given without --login"),
        _ => Ok(Credentials::from_parts(login, password)),
    }
}

fn connect_or_exit(server: &str, port: u16, credentials: Option<Credentials>) -> BugzillaClient {
    match BugzillaClient::connect(server, port) {
        Ok(client) => match credentials {
            Some(credentials) => {
                tracing::debug!("credentials set for every call");
                client.with_credentials(credentials)
            }
            None => client,
        },
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

async fn list_products(
    client: &BugzillaClient,
    listing: ProductListing,
) -> Result<FormattedString, CallError> {
    let product = client.product();
    let products = match listing {
        ProductListing::Selectable => product.selectable_products().await?,
        ProductListing::Enterable => product.enterable_products().await?,
        ProductListing::Accessible => product.accessible_products().await?,
    };
    Ok(FormattedString::from(ProductList(products)))
}

async fn run_bug(client: &BugzillaClient, command: BugCommands) -> Result<Value, CallError> {
    let bug = client.bug();
    match command {
        BugCommands::Get { ids } => bug.get(ids).await,
        BugCommands::History { ids } => bug.history(ids).await,
        BugCommands::Comments { ids } => bug.comments(ids_mapping(ids)).await,
        BugCommands::Attachments { ids } => bug.attachments(ids_mapping(ids)).await,
        BugCommands::Fields { fields } if fields.is_empty() => bug.fields(Args::Absent).await,
        BugCommands::Fields { fields } => bug.fields(fields).await,
    }
}

fn ids_mapping(ids: Vec<Identifier>) -> Params {
    let mut params = Params::new();
    params.insert(
        "ids".to_string(),
        Value::Array(ids.into_iter().map(Value::from).collect()),
    );
    params
}
