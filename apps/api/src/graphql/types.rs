//! GraphQL output types.
//!
//! GraphQL `Int` is 32-bit, while the store works in `i64`. Conversion is
//! checked here; the core caps amounts at `i32::MAX` and ids stay contiguous,
//! so a failure means the database was edited behind the API's back.

use async_graphql::SimpleObject;
use stockroom_core::{BatchPayload, Item};

use crate::error::ApiError;

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Item")]
pub struct ItemObject {
    /// Position-like identifier, always `1..=N` after a delete
    pub id: i32,
    pub name: String,
    pub manufacturer: String,
    /// Units in stock
    pub amount: i32,
}

impl TryFrom<Item> for ItemObject {
    type Error = ApiError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        Ok(ItemObject {
            id: to_graphql_int("id", item.id)?,
            amount: to_graphql_int("amount", item.amount)?,
            name: item.name,
            manufacturer: item.manufacturer,
        })
    }
}

/// Result of a batch delete.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "BatchPayload")]
pub struct BatchPayloadObject {
    /// Rows actually removed
    pub count: i32,
}

impl TryFrom<BatchPayload> for BatchPayloadObject {
    type Error = ApiError;

    fn try_from(payload: BatchPayload) -> Result<Self, Self::Error> {
        let count = i32::try_from(payload.count)
            .map_err(|_| ApiError::internal(format!("count {} does not fit in Int", payload.count)))?;
        Ok(BatchPayloadObject { count })
    }
}

fn to_graphql_int(field: &str, value: i64) -> Result<i32, ApiError> {
    i32::try_from(value)
        .map_err(|_| ApiError::internal(format!("{field} {value} does not fit in Int")))
}
