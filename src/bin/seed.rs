use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use rust_decimal::Decimal;
use shopping_list_api::{
    catalog::{Catalog, CategoryLookup},
    config::AppConfig,
    db::{create_pool, orm_from_pool},
    models::{NewList, NewListItem},
    store::{ListStore, PgListStore},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_id = ensure_user(&pool, "demo@example.com", "demo123", "Demo", "User").await?;
    let store = PgListStore::new(pool.clone(), orm_from_pool(&pool));
    seed_list(&store, user_id).await?;

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, first_name, last_name)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET first_name = EXCLUDED.first_name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email}");
    Ok(id)
}

async fn seed_list(store: &PgListStore, user_id: Uuid) -> anyhow::Result<()> {
    let existing = store.lists_with_item_count(user_id).await?;
    if existing.iter().any(|entry| entry.list.title == "Weekly groceries") {
        println!("Demo list already present");
        return Ok(());
    }

    let list = store
        .create_list(
            user_id,
            NewList {
                title: "Weekly groceries".into(),
                description: Some("Seeded demo list".into()),
            },
        )
        .await?;

    let catalog = Catalog::builtin();
    let picks = [
        ("dry-foods", "red-lentil", 2, Decimal::new(4500, 2)),
        ("dry-foods", "chickpea", 1, Decimal::new(3875, 2)),
        ("basic-foods", "sugar", 1, Decimal::new(3200, 2)),
    ];
    let mut items = Vec::with_capacity(picks.len());
    for (category_id, product_id, quantity, unit_price) in picks {
        let category = catalog
            .category(category_id)
            .ok_or_else(|| anyhow::anyhow!("unknown category {category_id}"))?;
        let product = catalog
            .products(category_id)
            .and_then(|products| products.iter().find(|p| p.id == product_id))
            .ok_or_else(|| anyhow::anyhow!("unknown product {product_id}"))?;
        items.push(NewListItem {
            title: product.name.clone(),
            quantity,
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            unit_price,
        });
    }

    let inserted = store.insert_items(user_id, list.id, items).await?;
    println!("Seeded list {} with {} items", list.id, inserted.len());
    Ok(())
}
