use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use bizhub_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@mercibizhub.com", "admin123", "admin").await?;
    let clerk_id = ensure_user(&pool, "clerk@mercibizhub.com", "clerk123", "user").await?;
    seed_products(&pool, clerk_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, Clerk ID: {clerk_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_products(pool: &sqlx::PgPool, owner: Uuid) -> anyhow::Result<()> {
    // (name, category, base price, generator price, stock, favorite), prices in kobo.
    let products: Vec<(&str, &str, i64, Option<i64>, Option<i32>, bool)> = vec![
        ("Affidavit Typing", "Service", 150000, Some(200000), None, true),
        ("Photocopy Per Page", "Service", 5000, Some(7500), None, true),
        ("Lamination", "Service", 50000, Some(70000), None, false),
        ("Passport Photograph", "Service", 100000, Some(150000), None, false),
        ("A4 Paper Ream", "Product", 650000, None, Some(40), false),
        ("Spiral Binding", "Service", 120000, Some(160000), None, false),
    ];

    for (name, category, price, gen_price, stock, favorite) in products {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, product_name, category, price, gen_price, stock, favorite, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ON CONFLICT (product_name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(gen_price)
        .bind(stock)
        .bind(favorite)
        .bind(owner)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
