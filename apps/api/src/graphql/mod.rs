//! # GraphQL Schema
//!
//! Query and mutation roots for the inventory API.
//!
//! ## Schema
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  type Item { id: Int!, name: String!, manufacturer: String!,           │
//! │              amount: Int! }                                             │
//! │  type BatchPayload { count: Int! }                                     │
//! │                                                                         │
//! │  type Query {                                                          │
//! │    items(limit: Int, offset: Int, search: String): [Item!]!            │
//! │  }                                                                      │
//! │  type Mutation {                                                       │
//! │    createItem(name: String, manufacturer: String, amount: Int): Item!  │
//! │    deleteItems(ids: [Int!]!): BatchPayload!                            │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolvers are thin: they widen GraphQL `Int` to `i64`, call the
//! [`InventoryService`] and narrow the results back. Every failure leaves
//! through [`ErrorExtensions::extend`] so clients get `extensions.code`.

pub mod types;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Result, Schema};
use stockroom_core::{Item, ItemQuery};

use crate::error::ApiError;
use crate::service::InventoryService;

pub use types::{BatchPayloadObject, ItemObject};

/// The executable inventory schema.
pub type InventorySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the service in its context.
pub fn build_schema(service: InventoryService) -> InventorySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

// =============================================================================
// Query
// =============================================================================

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Items ordered by id. `search` matches name or manufacturer,
    /// case-insensitively; paging applies after the search.
    async fn items(
        &self,
        ctx: &Context<'_>,
        limit: Option<i32>,
        offset: Option<i32>,
        search: Option<String>,
    ) -> Result<Vec<ItemObject>> {
        let service = ctx.data::<InventoryService>()?;

        let query = ItemQuery {
            limit: limit.map(i64::from),
            offset: offset.map(i64::from),
            search,
        };

        let items = service.list(query).await.map_err(|e| e.extend())?;
        to_objects(items).map_err(|e| e.extend())
    }
}

// =============================================================================
// Mutation
// =============================================================================

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Adds stock. An existing item with the same name and manufacturer has
    /// the amount added to its total; otherwise a new item is created.
    async fn create_item(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        manufacturer: Option<String>,
        amount: Option<i32>,
    ) -> Result<ItemObject> {
        let service = ctx.data::<InventoryService>()?;

        let item = service
            .create_or_merge(name.as_deref(), manufacturer.as_deref(), amount.map(i64::from))
            .await
            .map_err(|e| e.extend())?;

        ItemObject::try_from(item).map_err(|e| e.extend())
    }

    /// Deletes items by id, then renumbers the rest to `1..N`.
    async fn delete_items(&self, ctx: &Context<'_>, ids: Vec<i32>) -> Result<BatchPayloadObject> {
        let service = ctx.data::<InventoryService>()?;

        let ids: Vec<i64> = ids.into_iter().map(i64::from).collect();
        let payload = service.batch_delete(&ids).await.map_err(|e| e.extend())?;

        BatchPayloadObject::try_from(payload).map_err(|e| e.extend())
    }
}

fn to_objects(items: Vec<Item>) -> Result<Vec<ItemObject>, ApiError> {
    items.into_iter().map(ItemObject::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{value, Request, Variables};
    use serde_json::json;
    use stockroom_db::{Database, DbConfig};

    async fn schema() -> InventorySchema {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        build_schema(InventoryService::new(db))
    }

    #[tokio::test]
    async fn test_sdl_exposes_operations() {
        let sdl = schema().await.sdl();

        assert!(sdl.contains("items(limit: Int, offset: Int, search: String): [Item!]!"));
        assert!(sdl.contains("createItem(name: String, manufacturer: String, amount: Int): Item!"));
        assert!(sdl.contains("deleteItems(ids: [Int!]!): BatchPayload!"));
        assert!(sdl.contains("type BatchPayload"));
    }

    #[tokio::test]
    async fn test_create_merge_and_list() {
        let schema = schema().await;

        let res = schema
            .execute(r#"mutation { createItem(name: "Bolt", manufacturer: "Acme", amount: 10) { id amount } }"#)
            .await;
        assert!(res.errors.is_empty(), "{:?}", res.errors);
        assert_eq!(res.data, value!({ "createItem": { "id": 1, "amount": 10 } }));

        let res = schema
            .execute(r#"mutation { createItem(name: "Bolt", manufacturer: "Acme", amount: 5) { id amount } }"#)
            .await;
        assert_eq!(res.data, value!({ "createItem": { "id": 1, "amount": 15 } }));

        let res = schema.execute("{ items { id name manufacturer amount } }").await;
        assert_eq!(
            res.data,
            value!({ "items": [{ "id": 1, "name": "Bolt", "manufacturer": "Acme", "amount": 15 }] })
        );
    }

    #[tokio::test]
    async fn test_delete_renumbers() {
        let schema = schema().await;

        for name in ["Bolt", "Nut", "Washer"] {
            let request = Request::new(
                "mutation($name: String) { createItem(name: $name, manufacturer: \"Acme\") { id } }",
            )
            .variables(Variables::from_json(json!({ "name": name })));
            assert!(schema.execute(request).await.errors.is_empty());
        }

        let res = schema
            .execute("mutation { deleteItems(ids: [1, 1, 99]) { count } }")
            .await;
        assert_eq!(res.data, value!({ "deleteItems": { "count": 1 } }));

        let res = schema.execute("{ items { id name } }").await;
        assert_eq!(
            res.data,
            value!({ "items": [{ "id": 1, "name": "Nut" }, { "id": 2, "name": "Washer" }] })
        );
    }

    #[tokio::test]
    async fn test_search_and_paging() {
        let schema = schema().await;

        for (name, manufacturer) in [("Bolt", "Acme"), ("Gear", "Globex"), ("Nut", "ACME")] {
            let request = Request::new(
                "mutation($n: String, $m: String) { createItem(name: $n, manufacturer: $m) { id } }",
            )
            .variables(Variables::from_json(json!({ "n": name, "m": manufacturer })));
            assert!(schema.execute(request).await.errors.is_empty());
        }

        let res = schema.execute(r#"{ items(search: "acme") { id } }"#).await;
        assert_eq!(res.data, value!({ "items": [{ "id": 1 }, { "id": 3 }] }));

        let res = schema
            .execute(r#"{ items(search: "acme", limit: 1, offset: 1) { name } }"#)
            .await;
        assert_eq!(res.data, value!({ "items": [{ "name": "Nut" }] }));

        let res = schema.execute("{ items(limit: 0) { id } }").await;
        assert_eq!(res.data, value!({ "items": [] }));
    }

    #[tokio::test]
    async fn test_search_ignores_unicode_case() {
        let schema = schema().await;

        for (name, manufacturer) in [("Écrou", "Société Générale"), ("Bolt", "Acme")] {
            let request = Request::new(
                "mutation($n: String, $m: String) { createItem(name: $n, manufacturer: $m) { id } }",
            )
            .variables(Variables::from_json(json!({ "n": name, "m": manufacturer })));
            assert!(schema.execute(request).await.errors.is_empty());
        }

        let res = schema.execute(r#"{ items(search: "écrou") { id } }"#).await;
        assert_eq!(res.data, value!({ "items": [{ "id": 1 }] }));

        let res = schema.execute(r#"{ items(search: "SOCIÉTÉ") { name } }"#).await;
        assert_eq!(res.data, value!({ "items": [{ "name": "Écrou" }] }));
    }

    #[tokio::test]
    async fn test_negative_amount_decrements() {
        let schema = schema().await;

        schema
            .execute(r#"mutation { createItem(name: "Bolt", manufacturer: "Acme", amount: 5) { id } }"#)
            .await;
        let res = schema
            .execute(r#"mutation { createItem(name: "Bolt", manufacturer: "Acme", amount: -2) { id amount } }"#)
            .await;
        assert!(res.errors.is_empty(), "{:?}", res.errors);
        assert_eq!(res.data, value!({ "createItem": { "id": 1, "amount": 3 } }));
    }

    #[tokio::test]
    async fn test_validation_errors_carry_code() {
        let schema = schema().await;

        let res = schema
            .execute(r#"mutation { createItem(manufacturer: "Acme", amount: 1) { id } }"#)
            .await;
        assert_eq!(res.errors.len(), 1);
        let extensions = serde_json::to_value(res.errors[0].extensions.as_ref().unwrap()).unwrap();
        assert_eq!(extensions["code"], "VALIDATION_ERROR");

        let res = schema.execute("{ items(offset: -1) { id } }").await;
        assert_eq!(res.errors.len(), 1);
        assert!(res.errors[0].message.contains("offset"));
        let extensions = serde_json::to_value(res.errors[0].extensions.as_ref().unwrap()).unwrap();
        assert_eq!(extensions["code"], "VALIDATION_ERROR");
    }
}
