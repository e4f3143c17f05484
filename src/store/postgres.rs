use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use super::{Clock, ProductStore};
use crate::{
    db::{DbPool, orm_from_pool},
    dto::products::ProductChanges,
    entity::products::{ActiveModel, Column, Entity as Products},
    error::{AppError, AppResult},
    models::{Product, ProductId},
    validation::merge_and_validate,
};

/// Store backed by the `products` table.
pub struct PgProductStore {
    orm: DatabaseConnection,
    clock: Clock,
}

impl PgProductStore {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self {
            orm,
            clock: Clock::default(),
        }
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self::new(orm_from_pool(pool))
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_all(&self) -> AppResult<Vec<Product>> {
        let items = Products::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(Product::from)
            .collect();
        Ok(items)
    }

    async fn get_by_id(&self, id: ProductId) -> AppResult<Product> {
        Products::find_by_id(id.as_uuid())
            .one(&self.orm)
            .await?
            .map(Product::from)
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, changes: ProductChanges) -> AppResult<Product> {
        let fields = merge_and_validate(changes, None)?;
        let now = self.clock.tick();
        let active = ActiveModel {
            id: Set(ProductId::generate().as_uuid()),
            name: Set(fields.name),
            description: Set(fields.description),
            price: Set(fields.price),
            category: Set(fields.category),
            stock: Set(fields.stock),
            image: Set(fields.image),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let product = active.insert(&self.orm).await?;
        Ok(product.into())
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> AppResult<Product> {
        // The row lock makes a concurrent delete either wait for this update or win and
        // leave nothing to select.
        let txn = self.orm.begin().await?;
        let existing = Products::find_by_id(id.as_uuid())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let current = Product::from(existing.clone());
        let fields = merge_and_validate(changes, Some(&current.fields()))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(fields.name);
        active.description = Set(fields.description);
        active.price = Set(fields.price);
        active.category = Set(fields.category);
        active.stock = Set(fields.stock);
        active.image = Set(fields.image);
        active.updated_at = Set(self.clock.after(Some(current.updated_at)));

        let product = active.update(&txn).await?;
        txn.commit().await?;
        Ok(product.into())
    }

    async fn delete(&self, id: ProductId) -> AppResult<()> {
        let result = Products::delete_by_id(id.as_uuid()).exec(&self.orm).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
