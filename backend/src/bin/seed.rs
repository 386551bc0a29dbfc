//! Seed binary: sample catalog data and an initial administrator account
//!
//! Idempotent: existing rows (matched by unique name, SKU or username) are
//! left alone, so the binary can be run repeatedly against the same
//! database.

use anyhow::Result;
use bcrypt::{hash, DEFAULT_COST};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

#[path = "../config.rs"]
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&db).await?;

    create_admin_user(&db).await?;
    create_sample_catalog(&db).await?;

    tracing::info!("Seeding complete");
    Ok(())
}

/// Create the initial administrator account if it does not exist
async fn create_admin_user(db: &PgPool) -> Result<()> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind("sysadmin")
            .fetch_one(db)
            .await?;

    if exists {
        tracing::info!("Admin user 'sysadmin' already exists");
        return Ok(());
    }

    let password_hash = hash("Admin123", DEFAULT_COST)?;

    sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, company_name, is_admin)
        VALUES ($1, $2, $3, $4, true)
        "#,
    )
    .bind("sysadmin")
    .bind("admin@example.com")
    .bind(&password_hash)
    .bind("System Administrator")
    .execute(db)
    .await?;

    tracing::info!("Admin user 'sysadmin' created");
    Ok(())
}

/// Create sample categories, suppliers and products
async fn create_sample_catalog(db: &PgPool) -> Result<()> {
    let categories = [
        ("Electronics", "Electronic devices and appliances"),
        ("Office Supplies", "Office tools and consumables"),
        ("Furniture", "Office and home furniture"),
        ("Computing", "Computers and accessories"),
    ];

    for (name, description) in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(description)
        .execute(db)
        .await?;
    }

    let suppliers = [
        (
            "TechCorp Ltd.",
            "John Kovacs",
            "john.kovacs@techcorp.example",
            "+36 1 234 5678",
            "Budapest, Kossuth Lajos utca 1.",
        ),
        (
            "OfficePlus Inc.",
            "Anna Nagy",
            "anna.nagy@officeplus.example",
            "+36 1 876 5432",
            "Debrecen, Piac utca 15.",
        ),
        (
            "FurnitureMax Ltd.",
            "Peter Szabo",
            "peter.szabo@furnituremax.example",
            "+36 1 345 6789",
            "Szeged, Fo utca 25.",
        ),
    ];

    for (name, contact_person, email, phone, address) in suppliers {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE name = $1)")
                .bind(name)
                .fetch_one(db)
                .await?;
        if exists {
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO suppliers (name, contact_person, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(name)
        .bind(contact_person)
        .bind(email)
        .bind(phone)
        .bind(address)
        .execute(db)
        .await?;
    }

    // (name, sku, net price, category, supplier, stock, min stock, description)
    let products = [
        (
            "Dell Laptop Inspiron 15",
            "DELL-INSP-15-001",
            "250000",
            "Computing",
            "TechCorp Ltd.",
            5,
            2,
            "15.6\" Full HD laptop, Intel Core i5, 8GB RAM, 256GB SSD",
        ),
        (
            "HP LaserJet Pro printer",
            "HP-LJP-PRO-001",
            "45000",
            "Electronics",
            "TechCorp Ltd.",
            3,
            1,
            "Monochrome laser printer with USB and network connectivity",
        ),
        (
            "Ergonomic office chair",
            "OFFICE-CHAIR-ERG-001",
            "35000",
            "Furniture",
            "FurnitureMax Ltd.",
            8,
            3,
            "Black ergonomic office chair with adjustable height",
        ),
        (
            "A4 paper 500 sheets",
            "PAPER-A4-500-001",
            "1200",
            "Office Supplies",
            "OfficePlus Inc.",
            50,
            10,
            "80g/m2 A4 white paper, pack of 500 sheets",
        ),
        (
            "Logitech wireless mouse",
            "LOGI-MOUSE-WL-001",
            "8500",
            "Computing",
            "TechCorp Ltd.",
            12,
            5,
            "Wireless optical mouse with USB receiver",
        ),
        (
            "Pilot pen blue",
            "PILOT-PEN-BLUE-001",
            "250",
            "Office Supplies",
            "OfficePlus Inc.",
            100,
            20,
            "Blue ballpoint pen, 0.7mm, box of 12",
        ),
    ];

    for (name, sku, net_price, category, supplier, stock, min_stock, description) in products {
        let category_id =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM categories WHERE name = $1")
                .bind(category)
                .fetch_one(db)
                .await?;
        let supplier_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM suppliers WHERE name = $1")
            .bind(supplier)
            .fetch_one(db)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO products (name, description, sku, net_price, category_id, supplier_id,
                                  stock_quantity, min_stock_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (sku) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(sku)
        .bind(Decimal::from_str(net_price)?)
        .bind(category_id)
        .bind(supplier_id)
        .bind(stock)
        .bind(min_stock)
        .execute(db)
        .await?;
    }

    tracing::info!("Sample catalog created");
    Ok(())
}
