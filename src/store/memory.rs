use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Clock, ProductStore};
use crate::{
    dto::products::ProductChanges,
    error::{AppError, AppResult},
    models::{Product, ProductId},
    validation::merge_and_validate,
};

/// Process-local store. Used when no database is configured, and by tests.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    records: RwLock<HashMap<ProductId, Product>>,
    clock: Clock,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> AppResult<Vec<Product>> {
        let records = self.records.read().await;
        let mut items: Vec<Product> = records.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn get_by_id(&self, id: ProductId) -> AppResult<Product> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, changes: ProductChanges) -> AppResult<Product> {
        let fields = merge_and_validate(changes, None)?;
        let mut records = self.records.write().await;
        let mut id = ProductId::generate();
        while records.contains_key(&id) {
            id = ProductId::generate();
        }
        let product = Product::new(id, fields, self.clock.tick());
        records.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> AppResult<Product> {
        let mut records = self.records.write().await;
        let existing = records.get_mut(&id).ok_or(AppError::NotFound)?;
        let fields = merge_and_validate(changes, Some(&existing.fields()))?;
        let updated_at = self.clock.after(Some(existing.updated_at));
        existing.apply(fields, updated_at);
        Ok(existing.clone())
    }

    async fn delete(&self, id: ProductId) -> AppResult<()> {
        self.records
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::DEFAULT_IMAGE;

    fn changes(name: &str) -> ProductChanges {
        ProductChanges {
            name: Some(name.into()),
            description: Some("Blue ink".into()),
            price: Some(2000.0),
            category: Some("Stationery".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_the_same_record() {
        let store = MemoryProductStore::new();
        let created = store.create(changes("Pen")).await.unwrap();

        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.stock, 0);
        assert_eq!(created.image, DEFAULT_IMAGE);

        let fetched = store.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryProductStore::new();
        let a = store.create(changes("A")).await.unwrap();
        let b = store.create(changes("B")).await.unwrap();
        let c = store.create(changes("C")).await.unwrap();

        let ids: Vec<ProductId> = store.list_all().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn empty_update_only_moves_updated_at() {
        let store = MemoryProductStore::new();
        let created = store.create(changes("Pen")).await.unwrap();

        let updated = store
            .update(created.id, ProductChanges::default())
            .await
            .unwrap();

        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.fields(), created.fields());
        assert_eq!(updated.id, created.id);
    }

    #[tokio::test]
    async fn invalid_update_leaves_record_untouched() {
        let store = MemoryProductStore::new();
        let created = store.create(changes("Pen")).await.unwrap();

        let err = store
            .update(
                created.id,
                ProductChanges {
                    price: Some(-5.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.contains("price")));

        assert_eq!(store.get_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn delete_is_final() {
        let store = MemoryProductStore::new();
        let created = store.create(changes("Pen")).await.unwrap();

        store.delete(created.id).await.unwrap();

        assert!(matches!(store.get_by_id(created.id).await, Err(AppError::NotFound)));
        assert!(matches!(store.delete(created.id).await, Err(AppError::NotFound)));
        assert!(matches!(
            store.update(created.id, ProductChanges::default()).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found_despite_type_errors() {
        let store = MemoryProductStore::new();
        let mut type_errors = crate::validation::ValidationErrors::default();
        type_errors.add("price", "price must be a number");

        let result = store
            .update(
                ProductId::generate(),
                ProductChanges {
                    type_errors,
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() {
        let store = MemoryProductStore::new();
        let err = store
            .create(ProductChanges {
                name: None,
                ..changes("Pen")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.contains("name")));
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
