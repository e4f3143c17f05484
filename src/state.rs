use std::sync::Arc;

use crate::store::{MemoryProductStore, ProductStore};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: impl ProductStore + 'static) -> Self {
        Self {
            products: Arc::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryProductStore::new())
    }
}
