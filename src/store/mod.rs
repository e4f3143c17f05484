//! Product persistence behind a swappable backend.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::{
    dto::products::ProductChanges,
    error::AppResult,
    models::{Product, ProductId},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

/// Validated persistence of products.
///
/// Every write validates the record it is about to persist, so a store never holds a product
/// that breaks a field constraint. Each write is atomic per record.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, most recently created first.
    async fn list_all(&self) -> AppResult<Vec<Product>>;

    async fn get_by_id(&self, id: ProductId) -> AppResult<Product>;

    async fn create(&self, changes: ProductChanges) -> AppResult<Product>;

    /// Overlays `changes` on the stored record, revalidates the result and refreshes
    /// `updated_at`. Fails with `NotFound` if the record is gone, including when a concurrent
    /// delete got there first.
    async fn update(&self, id: ProductId, changes: ProductChanges) -> AppResult<Product>;

    async fn delete(&self, id: ProductId) -> AppResult<()>;
}

/// Hands out strictly increasing timestamps at microsecond precision, the finest a
/// `TIMESTAMPTZ` column keeps.
#[derive(Debug, Default)]
pub(crate) struct Clock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl Clock {
    pub(crate) fn tick(&self) -> DateTime<Utc> {
        self.after(None)
    }

    /// Like [`Clock::tick`] but also later than `floor`.
    pub(crate) fn after(&self, floor: Option<DateTime<Utc>>) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Utc::now().trunc_subsecs(6);
        for bound in [*last, floor].into_iter().flatten() {
            if next <= bound {
                next = bound + Duration::microseconds(1);
            }
        }
        *last = Some(next);
        next
    }
}
