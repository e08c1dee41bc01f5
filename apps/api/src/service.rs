//! # Inventory Service
//!
//! The operations behind the GraphQL resolvers.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Request Flow                               │
//! │                                                                         │
//! │  Resolver (GraphQL arguments, i32)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryService                                                      │
//! │  ├── validate through stockroom-core  ──► ValidationError → ApiError  │
//! │  ├── call ItemRepository              ──► DbError → ApiError          │
//! │  └── log outcome                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Item / Vec<Item> / BatchPayload                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service holds the database handle and nothing else, so cloning it into
//! the GraphQL context is cheap and every request sees the same pool.

use std::time::Instant;

use stockroom_core::{BatchPayload, Item, ItemQuery, MergeOutcome, NewItem};
use stockroom_db::Database;
use tracing::{debug, info};

use crate::error::ApiResult;

/// Inventory operations over a shared database pool.
#[derive(Debug, Clone)]
pub struct InventoryService {
    db: Database,
}

impl InventoryService {
    pub fn new(db: Database) -> Self {
        InventoryService { db }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Lists items ordered by id, optionally filtered and paged.
    ///
    /// ## Arguments
    /// * `query` - Raw limit/offset/search as received from the client
    ///
    /// ## Returns
    /// The requested page. An empty page is `[]`, never an error.
    pub async fn list(&self, query: ItemQuery) -> ApiResult<Vec<Item>> {
        debug!(?query, "Listing items");
        let start = Instant::now();

        let filter = query.into_filter()?;
        let items = self.db.items().list(&filter).await?;

        debug!(
            count = items.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Items listed"
        );

        Ok(items)
    }

    /// Adds stock: merges into an existing (name, manufacturer) row or
    /// creates a new row with the next id.
    ///
    /// ## Arguments
    /// * `name` - Required, kept verbatim
    /// * `manufacturer` - Required, kept verbatim
    /// * `amount` - Defaults to 0 when absent; negative takes stock away
    ///
    /// ## Returns
    /// The created row, or the merged row with its new total.
    pub async fn create_or_merge(
        &self,
        name: Option<&str>,
        manufacturer: Option<&str>,
        amount: Option<i64>,
    ) -> ApiResult<Item> {
        debug!(?name, ?manufacturer, ?amount, "createItem");

        let new_item = NewItem::new(name, manufacturer, amount)?;
        let outcome = self.db.items().create_or_merge(&new_item).await?;

        match &outcome {
            MergeOutcome::Created(item) => info!(
                id = item.id,
                name = %item.name,
                manufacturer = %item.manufacturer,
                amount = item.amount,
                "Item created"
            ),
            MergeOutcome::Merged(item) => info!(
                id = item.id,
                name = %item.name,
                manufacturer = %item.manufacturer,
                added = new_item.amount,
                amount = item.amount,
                "Item merged"
            ),
        }

        Ok(outcome.into_item())
    }

    /// Deletes items by id and renumbers the survivors to `1..=N`.
    ///
    /// ## Arguments
    /// * `ids` - Ids to delete; duplicates and unknown ids are ignored
    ///
    /// ## Returns
    /// How many rows were actually removed.
    pub async fn batch_delete(&self, ids: &[i64]) -> ApiResult<BatchPayload> {
        debug!(?ids, "deleteItems");

        let count = self.db.items().batch_delete(ids).await?;

        info!(requested = ids.len(), deleted = count, "Items deleted");

        Ok(BatchPayload { count })
    }
}
