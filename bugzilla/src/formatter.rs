use bugzilla_core::{api::CallError, args::Params, transport::TransportError};
use colored::*;
use std::fmt::Display;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

/// Products keyed by name, as returned by the composed product listings.
pub struct ProductList(pub Params);

pub struct GenericError<T: Display>(pub &'static str, pub T);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<CallError> for FormattedString {
    fn from(err: CallError) -> Self {
        let header = match &err {
            CallError::UnknownOperation { .. } => "Unknown Operation:",
            CallError::InvalidParameters { .. } => "Invalid Parameters:",
            CallError::UnsupportedByServerVersion { .. } => "Unsupported By Server:",
            CallError::Transport(TransportError::Fault { .. }) => "Bugzilla Fault:",
            CallError::Transport(_) => "Call Failed:",
        };
        FormattedString(format!("{}\n\n'{}'", header.red().bold(), err))
    }
}

impl From<TransportError> for FormattedString {
    fn from(err: TransportError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Connection Error:".red().bold(), err))
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}

impl From<ProductList> for FormattedString {
    fn from(ProductList(products): ProductList) -> Self {
        if products.is_empty() {
            return FormattedString("No products found.".yellow().to_string());
        }

        let mut out = String::new();
        out.push_str("Products:\n");
        for (name, product) in products {
            let id = product
                .get("id")
                .map(|id| id.to_string())
                .unwrap_or_default();
            let description = product
                .get("description")
                .and_then(|d| d.as_str())
                .unwrap_or_default();

            out.push_str(&format!(
                "  - {} {} {}\n",
                name.green(),
                format!("#{id}").purple(),
                description
            ));
        }
        FormattedString(out.trim_end().to_string())
    }
}
