use catalog_api::{
    db::{create_pool, run_migrations},
    dto::products::ProductChanges,
    error::AppError,
    store::{PgProductStore, ProductStore},
    validation::DEFAULT_IMAGE,
};
use sqlx::Executor;

// Runs the store contract against a real database.
#[tokio::test]
async fn postgres_store_lifecycle() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run the postgres store test."
            );
            return Ok(());
        }
    };

    let pool = create_pool(&database_url, 2).await?;
    run_migrations(&pool).await?;
    pool.execute("TRUNCATE TABLE products").await?;
    let store = PgProductStore::from_pool(pool);

    let pen = store
        .create(ProductChanges {
            name: Some("Pen".into()),
            description: Some("Blue ink".into()),
            price: Some(2000.0),
            category: Some("Stationery".into()),
            ..Default::default()
        })
        .await?;
    assert_eq!(pen.stock, 0);
    assert_eq!(pen.image, DEFAULT_IMAGE);
    assert_eq!(pen.created_at, pen.updated_at);
    assert_eq!(store.get_by_id(pen.id).await?, pen);

    let notebook = store
        .create(ProductChanges {
            name: Some("Notebook".into()),
            description: Some("A5 dotted".into()),
            price: Some(35.5),
            category: Some("Stationery".into()),
            stock: Some(3),
            ..Default::default()
        })
        .await?;
    let ids: Vec<_> = store.list_all().await?.into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![notebook.id, pen.id]);

    let touched = store.update(pen.id, ProductChanges::default()).await?;
    assert!(touched.updated_at > pen.updated_at);
    assert_eq!(touched.fields(), pen.fields());

    let rejected = store
        .update(
            pen.id,
            ProductChanges {
                price: Some(-5.0),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(rejected, Err(AppError::Validation(_))));
    assert_eq!(store.get_by_id(pen.id).await?, touched);

    store.delete(pen.id).await?;
    assert!(matches!(store.get_by_id(pen.id).await, Err(AppError::NotFound)));
    assert!(matches!(
        store.update(pen.id, ProductChanges::default()).await,
        Err(AppError::NotFound)
    ));

    Ok(())
}
