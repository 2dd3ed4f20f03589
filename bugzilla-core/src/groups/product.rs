//! # Product API
//!
//! `Product.*` commands list the available products and fetch their records.
//!
//! Besides the raw listing commands, [`Product`] offers composed operations such as
//! [`Product::selectable_products`], which fetch the ids of a listing and then the full
//! records for those ids, keyed by product name.
//!
//! See <https://www.bugzilla.org/docs/tip/en/html/api/Bugzilla/WebService/Product.html>
use super::{Facade, server_info::ServerInfo};
use crate::{
    api::{CallError, CommandSpec},
    args::{Args, Params},
    normalize::Rule,
    transport::{Transport, TransportError},
};
use serde_json::Value;

pub const GROUP: &str = "Product";

pub(crate) const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(GROUP, "get_selectable_products", Rule::NoParams),
    CommandSpec::new(GROUP, "get_enterable_products", Rule::NoParams),
    CommandSpec::new(GROUP, "get_accessible_products", Rule::NoParams),
    CommandSpec::new(GROUP, "get", Rule::IdsRequired),
];

pub struct Product<T> {
    facade: Facade<T>,
}

impl<T: Transport> Product<T> {
    pub(crate) fn new(server_info: ServerInfo<T>) -> Self {
        Self {
            facade: Facade::new(GROUP, COMMANDS, server_info),
        }
    }

    /// Dispatches a `Product` operation, or a `Bugzilla` one if this group does not define it.
    pub async fn call(&self, operation: &str, args: Args) -> Result<Value, CallError> {
        self.facade.call(operation, args).await
    }

    pub fn server_info(&self) -> &ServerInfo<T> {
        self.facade.server_info()
    }

    /// Products the user can search on, keyed by product name.
    pub async fn selectable_products(&self) -> Result<Params, CallError> {
        self.products_of("get_selectable_products").await
    }

    /// Products the user can enter bugs against, keyed by product name.
    pub async fn enterable_products(&self) -> Result<Params, CallError> {
        self.products_of("get_enterable_products").await
    }

    /// Products the user can search or enter bugs against, keyed by product name.
    pub async fn accessible_products(&self) -> Result<Params, CallError> {
        self.products_of("get_accessible_products").await
    }

    /// `Product.get_selectable_products`: `{ids: [...]}` of the searchable products.
    pub async fn get_selectable_products(&self) -> Result<Value, CallError> {
        self.call("get_selectable_products", Args::Absent).await
    }

    /// `Product.get_enterable_products`: `{ids: [...]}` of the products open for new bugs.
    pub async fn get_enterable_products(&self) -> Result<Value, CallError> {
        self.call("get_enterable_products", Args::Absent).await
    }

    /// `Product.get_accessible_products`: union of the two listings above.
    pub async fn get_accessible_products(&self) -> Result<Value, CallError> {
        self.call("get_accessible_products", Args::Absent).await
    }

    /// `Product.get`: product records for a product id, a list of ids, or a mapping with an
    /// explicit `ids` key.
    pub async fn get(&self, args: impl Into<Args>) -> Result<Value, CallError> {
        self.call("get", args.into()).await
    }

    async fn products_of(&self, listing: &str) -> Result<Params, CallError> {
        let ids = match self.call(listing, Args::Absent).await? {
            Value::Object(ids) => ids,
            other => return Err(malformed(format!("{GROUP}.{listing} returned {other}"))),
        };

        let response = self.get(Args::Mapping(ids)).await?;
        key_by_name(response)
    }
}

fn key_by_name(response: Value) -> Result<Params, CallError> {
    let Some(Value::Array(products)) = response.get("products") else {
        return Err(malformed("Product.get returned no 'products' list".to_string()));
    };

    products
        .iter()
        .map(|product| {
            let name = product
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| malformed(format!("product without a name: {product}")))?;
            Ok((name.to_string(), product.clone()))
        })
        .collect()
}

fn malformed(reason: String) -> CallError {
    CallError::Transport(TransportError::MalformedResponse(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_products_by_name() {
        let response = json!({
            "products": [
                { "id": 1, "name": "Fedora", "description": "Fedora Linux" },
                { "id": 2, "name": "RHEL", "description": "Red Hat Enterprise Linux" }
            ]
        });

        let products = key_by_name(response).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products["Fedora"]["id"], json!(1));
        assert_eq!(products["RHEL"]["description"], json!("Red Hat Enterprise Linux"));
    }

    #[test]
    fn rejects_responses_without_products() {
        assert!(matches!(
            key_by_name(json!({ "faults": [] })),
            Err(CallError::Transport(TransportError::MalformedResponse(_)))
        ));
        assert!(matches!(
            key_by_name(json!({ "products": [{ "id": 3 }] })),
            Err(CallError::Transport(TransportError::MalformedResponse(_)))
        ));
    }
}
