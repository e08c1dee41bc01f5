//! # Item Repository
//!
//! Database operations for inventory items.
//!
//! ## Key Operations
//! - Paged, case-insensitive search over name and manufacturer (Unicode
//!   folded, via the `*_folded` columns)
//! - Create-or-merge by exact, case-sensitive (name, manufacturer)
//! - Batch delete followed by contiguous ID renumbering
//!
//! ## Transactions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_or_merge                      batch_delete                      │
//! │  ───────────────                      ────────────                      │
//! │  BEGIN                                BEGIN                             │
//! │  UPDATE amount += n  ← write lock     DELETE ... IN (...) ← write lock  │
//! │   ├─ 1 row: check amount range        SELECT id ORDER BY id             │
//! │   └─ 0 rows:                          UPDATE id = k  (per moved row)    │
//! │       SELECT MAX(id)                  COMMIT                            │
//! │       INSERT id = max + 1                                               │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both operations open with a write, so SQLite grants the write lock before
//! anything is read. A concurrent create can't pick the same next id, and no
//! reader sees half-renumbered IDs.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use stockroom_core::renumber::{next_item_id, normalize_ids, renumber_plan};
use stockroom_core::query::fold_case;
use stockroom_core::{
    CoreError, Item, ItemFilter, MergeOutcome, NewItem, MAX_ITEM_AMOUNT, MIN_ITEM_AMOUNT,
};

/// Bind parameters per `DELETE ... IN (...)` statement.
const DELETE_CHUNK_SIZE: usize = 500;

/// Repository for item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemRepository::new(pool);
///
/// let outcome = repo.create_or_merge(&new_item).await?;
/// let deleted = repo.batch_delete(&[1, 3]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists items, optionally filtered by a search pattern.
    ///
    /// ## How It Works
    /// 1. With a search pattern, keeps rows whose folded `name` OR
    ///    `manufacturer` contains it
    /// 2. Orders by ascending `id` (the display position)
    /// 3. Skips `offset` rows, then takes `limit`
    pub async fn list(&self, filter: &ItemFilter) -> DbResult<Vec<Item>> {
        debug!(
            limit = ?filter.limit,
            offset = filter.offset,
            search = ?filter.search_pattern,
            "Listing items"
        );

        if filter.is_empty_page() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id, name, manufacturer, amount FROM items");

        if let Some(pattern) = &filter.search_pattern {
            query
                .push(" WHERE name_folded LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR manufacturer_folded LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\'");
        }

        // SQLite only accepts OFFSET after LIMIT; -1 means unlimited
        query
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(filter.sql_limit())
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let items = query.build_query_as::<Item>().fetch_all(&self.pool).await?;

        debug!(count = items.len(), "List returned items");
        Ok(items)
    }

    /// Creates a new item or adds to the amount of the matching one.
    ///
    /// ## Flow
    /// ```text
    /// createItem("Bolt", "Acme", 3)
    ///      │
    ///      ▼
    /// UPDATE items SET amount = amount + 3
    /// WHERE name = 'Bolt' AND manufacturer = 'Acme'
    ///      │
    ///      ├── 1 row  → Merged { id: 1, amount: 8 }   (negative n takes stock away)
    ///      │
    ///      └── 0 rows → SELECT MAX(id) → 4
    ///                   INSERT (id = 5, ...) → Created { id: 5, amount: 3 }
    /// ```
    ///
    /// ## Errors
    /// * `DbError::Domain(AmountOutOfRange)` - merged amount leaves
    ///   `MIN_ITEM_AMOUNT..=MAX_ITEM_AMOUNT`; nothing is written
    pub async fn create_or_merge(&self, new_item: &NewItem) -> DbResult<MergeOutcome> {
        debug!(
            name = %new_item.name,
            manufacturer = %new_item.manufacturer,
            amount = new_item.amount,
            "Creating or merging item"
        );

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        // Must stay the first statement: it takes the write lock that makes
        // the MAX(id) read below safe against concurrent creates.
        let merged = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET amount = amount + ?1
            WHERE name = ?2 AND manufacturer = ?3
            RETURNING id, name, manufacturer, amount
            "#,
        )
        .bind(new_item.amount)
        .bind(&new_item.name)
        .bind(&new_item.manufacturer)
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = match merged {
            Some(item) if !(MIN_ITEM_AMOUNT..=MAX_ITEM_AMOUNT).contains(&item.amount) => {
                // dropping `tx` rolls the increment back
                return Err(CoreError::AmountOutOfRange {
                    name: item.name,
                    manufacturer: item.manufacturer,
                    resulting: item.amount,
                    min: MIN_ITEM_AMOUNT,
                    max: MAX_ITEM_AMOUNT,
                }
                .into());
            }
            Some(item) => MergeOutcome::Merged(item),
            None => {
                let max_id: Option<i64> = sqlx::query_scalar("SELECT MAX(id) FROM items")
                    .fetch_one(&mut *tx)
                    .await?;
                let id = next_item_id(max_id);

                let item = sqlx::query_as::<_, Item>(
                    r#"
                    INSERT INTO items
                        (id, name, manufacturer, amount, name_folded, manufacturer_folded)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    RETURNING id, name, manufacturer, amount
                    "#,
                )
                .bind(id)
                .bind(&new_item.name)
                .bind(&new_item.manufacturer)
                .bind(new_item.amount)
                .bind(fold_case(&new_item.name))
                .bind(fold_case(&new_item.manufacturer))
                .fetch_one(&mut *tx)
                .await?;

                MergeOutcome::Created(item)
            }
        };

        tx.commit().await.map_err(DbError::transaction)?;

        info!(
            id = outcome.item().id,
            amount = outcome.item().amount,
            created = outcome.is_created(),
            "Item stored"
        );
        Ok(outcome)
    }

    /// Deletes the given IDs and compacts the survivors to `1..=N`.
    ///
    /// ## Arguments
    /// * `ids` - IDs to delete; duplicates and unknown IDs are harmless
    ///
    /// ## Returns
    /// Number of rows actually deleted (not the number renumbered).
    pub async fn batch_delete(&self, ids: &[i64]) -> DbResult<u64> {
        let ids = normalize_ids(ids);
        debug!(ids = ?ids, "Deleting items");

        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let mut deleted = 0;
        for chunk in ids.chunks(DELETE_CHUNK_SIZE) {
            let mut query: QueryBuilder<'_, Sqlite> =
                QueryBuilder::new("DELETE FROM items WHERE id IN (");
            let mut list = query.separated(", ");
            for id in chunk {
                list.push_bind(*id);
            }
            list.push_unseparated(")");

            deleted += query.build().execute(&mut *tx).await?.rows_affected();
        }

        let remaining: Vec<i64> = sqlx::query_scalar("SELECT id FROM items ORDER BY id ASC")
            .fetch_all(&mut *tx)
            .await?;

        let plan = renumber_plan(&remaining);
        for step in &plan {
            sqlx::query("UPDATE items SET id = ?1 WHERE id = ?2")
                .bind(step.to)
                .bind(step.from)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await.map_err(DbError::transaction)?;

        info!(
            deleted,
            renumbered = plan.len(),
            remaining = remaining.len(),
            "Batch delete complete"
        );
        Ok(deleted)
    }

    /// Counts total items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
