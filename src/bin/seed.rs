//! Seed script for development — populates a fresh database with sample fleet data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use sqlx::PgPool;
use uuid::Uuid;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "Test123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = taxi::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== Taxi Fleet Seed Script ===");

    let admin_id = seed_admin_driver(&pool).await?;
    seed_fleet(&pool, admin_id).await?;

    println!("\n=== Seed complete! ===");
    println!("Login: {ADMIN_USERNAME} / {ADMIN_PASSWORD}");

    Ok(())
}

async fn seed_admin_driver(pool: &PgPool) -> anyhow::Result<Uuid> {
    let hash = taxi::services::auth::hash_password(ADMIN_PASSWORD)?;

    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM drivers WHERE username = $1")
        .bind(ADMIN_USERNAME)
        .fetch_optional(pool)
        .await?;

    if let Some(id) = existing {
        sqlx::query("UPDATE drivers SET password_hash = $1 WHERE id = $2")
            .bind(&hash)
            .bind(id)
            .execute(pool)
            .await?;
        println!("[done] Updated admin password");
        return Ok(id);
    }

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO drivers (username, password_hash, first_name, last_name, email, license_number)
         VALUES ($1, $2, 'Fleet', 'Admin', 'admin@taxi.local', 'ADM00001')
         RETURNING id",
    )
    .bind(ADMIN_USERNAME)
    .bind(&hash)
    .fetch_one(pool)
    .await?;

    println!("[done] Created admin driver");
    Ok(id)
}

async fn seed_fleet(pool: &PgPool, admin_id: Uuid) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM manufacturers")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Manufacturers already exist ({count})");
        return Ok(());
    }

    let fleet = [
        ("Toyota", "Japan", &["Corolla", "Camry", "Prius"][..]),
        ("Skoda", "Czech Republic", &["Octavia", "Superb"][..]),
        ("Hyundai", "South Korea", &["Elantra", "Sonata", "Ioniq"][..]),
    ];

    let mut cars = 0;
    for (name, country, models) in fleet {
        let manufacturer_id: Uuid = sqlx::query_scalar(
            "INSERT INTO manufacturers (name, country) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(country)
        .fetch_one(pool)
        .await?;

        for model in models {
            let car_id: Uuid = sqlx::query_scalar(
                "INSERT INTO cars (model, manufacturer_id) VALUES ($1, $2) RETURNING id",
            )
            .bind(*model)
            .bind(manufacturer_id)
            .fetch_one(pool)
            .await?;

            sqlx::query("INSERT INTO cars_drivers (car_id, driver_id) VALUES ($1, $2)")
                .bind(car_id)
                .bind(admin_id)
                .execute(pool)
                .await?;
            cars += 1;
        }
    }

    println!("[done] Created 3 manufacturers and {cars} cars");
    Ok(())
}
