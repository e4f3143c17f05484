use sea_orm::entity::prelude::*;

use crate::models::{Product, ProductId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub image: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: ProductId::from_uuid(model.id),
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            stock: model.stock,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
