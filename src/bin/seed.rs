use anyhow::Context;
use catalog_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::products::ProductChanges,
    store::{PgProductStore, ProductStore},
};

/// Demo catalog: name, description, price, category, stock.
const PRODUCTS: &[(&str, &str, f64, &str, i64)] = &[
    ("Laptop ASUS ROG", "Fast gaming laptop", 15_000_000.0, "Electronics", 10),
    ("iPhone 15 Pro", "Phone with a great camera", 18_000_000.0, "Electronics", 15),
    ("Samsung Smart TV 55\"", "Smart TV with 4K panel", 8_500_000.0, "Electronics", 8),
    ("Nike Air Max 2024", "Everyday running shoes", 1_500_000.0, "Fashion", 25),
    ("Sony WH-1000XM5", "Noise-cancelling headphones", 4_500_000.0, "Electronics", 12),
    ("Mechanical Keyboard RGB", "Loud and clicky keyboard", 1_200_000.0, "Accessories", 20),
    ("Gaming Mouse Logitech", "Lightweight wireless mouse", 800_000.0, "Accessories", 30),
    ("Smartwatch Samsung Galaxy", "A watch, but modern", 3_500_000.0, "Electronics", 18),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let reset = std::env::args().any(|arg| arg == "--reset");

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set to seed the catalog")?;
    let pool = create_pool(database_url, config.max_connections).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;
    let store = PgProductStore::from_pool(pool);

    let existing = store.list_all().await?;
    if !existing.is_empty() {
        if !reset {
            println!(
                "Catalog already holds {} products, pass --reset to replace them",
                existing.len()
            );
            return Ok(());
        }
        for product in &existing {
            store.delete(product.id).await?;
        }
        println!("Removed {} existing products", existing.len());
    }

    seed_products(&store).await?;
    Ok(())
}

async fn seed_products(store: &impl ProductStore) -> anyhow::Result<()> {
    for &(name, description, price, category, stock) in PRODUCTS {
        let product = store
            .create(ProductChanges {
                name: Some(name.to_string()),
                description: Some(description.to_string()),
                price: Some(price),
                category: Some(category.to_string()),
                stock: Some(stock),
                ..Default::default()
            })
            .await?;
        println!("Seeded {} ({})", product.name, product.id);
    }

    println!("Seeded {} products", PRODUCTS.len());
    Ok(())
}
