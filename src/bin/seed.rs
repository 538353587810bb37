use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use streamhub_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@streamhub.com", "admin123", "ADMIN", 100_000).await?;
    let user_id = ensure_user(&pool, "user@streamhub.com", "user123", "USER", 5_000).await?;
    seed_types(&pool).await?;
    seed_accounts(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
    credits: i64,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role, credits)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(credits)
    .fetch_optional(pool)
    .await?;

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

async fn seed_types(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let types = vec![
        ("Netflix", "Streaming de películas y series", "🎬", "#E50914"),
        ("Disney+", "Contenido Disney, Pixar, Marvel, Star Wars", "🏰", "#113CCF"),
        ("HBO Max", "Series HBO, películas Warner Bros", "🎭", "#B535F6"),
        ("Amazon Prime", "Streaming de Amazon con contenido variado", "📦", "#00A8E1"),
        ("Paramount+", "Contenido Paramount, CBS, Nickelodeon", "⭐", "#0064FF"),
        ("Apple TV+", "Contenido original de Apple", "🍎", "#000000"),
        ("Star+", "Contenido deportivo y entretenimiento", "⚡", "#0063E5"),
    ];

    for (name, description, icon, color) in types {
        sqlx::query(
            r#"
            INSERT INTO streaming_types (id, name, description, icon, color)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(icon)
        .bind(color)
        .execute(pool)
        .await?;
    }

    println!("Seeded streaming types");
    Ok(())
}

async fn seed_accounts(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    // (name, description, type name, price in hundredths, quality, screens, sale type, per-profile price)
    let accounts = vec![
        (
            "Netflix Premium",
            "Cuenta premium de Netflix con acceso a todo el catálogo",
            "Netflix",
            599,
            "4K",
            4,
            "PROFILES",
            Some(199_i64),
        ),
        (
            "Disney+ Premium",
            "Cuenta premium de Disney+ con todo el contenido",
            "Disney+",
            499,
            "4K",
            4,
            "FULL",
            None,
        ),
        (
            "HBO Max",
            "Cuenta de HBO Max con series y películas exclusivas",
            "HBO Max",
            699,
            "4K",
            3,
            "FULL",
            None,
        ),
        (
            "Amazon Prime Video",
            "Cuenta de Amazon Prime con beneficios adicionales",
            "Amazon Prime",
            399,
            "4K",
            3,
            "FULL",
            None,
        ),
        (
            "Paramount+",
            "Cuenta de Paramount+ con contenido exclusivo",
            "Paramount+",
            449,
            "HD",
            3,
            "FULL",
            None,
        ),
        (
            "Apple TV+",
            "Cuenta de Apple TV+ con contenido original",
            "Apple TV+",
            549,
            "4K",
            6,
            "FULL",
            None,
        ),
    ];

    for (name, description, type_name, price, quality, screens, sale_type, price_per_profile) in
        accounts
    {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM streaming_accounts WHERE name = $1")
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if existing.is_some() {
            continue;
        }

        let type_id: (Uuid,) = sqlx::query_as("SELECT id FROM streaming_types WHERE name = $1")
            .bind(type_name)
            .fetch_one(pool)
            .await?;

        let account_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO streaming_accounts
                (id, name, description, price, type_id, duration, quality, screens, sale_type, price_per_profile)
            VALUES ($1, $2, $3, $4, $5, 'mes', $6, $7, $8, $9)
            "#,
        )
        .bind(account_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(type_id.0)
        .bind(quality)
        .bind(screens)
        .bind(sale_type)
        .bind(price_per_profile)
        .execute(pool)
        .await?;

        // Seats for profile-mode accounts so the storefront has something
        // to allocate out of the box.
        if sale_type == "PROFILES" {
            for n in 1..=screens {
                sqlx::query(
                    r#"
                    INSERT INTO account_profiles (id, streaming_account_id, profile_name, profile_pin)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(account_id)
                .bind(format!("Perfil {n}"))
                .bind(format!("{:04}", n * 1111))
                .execute(pool)
                .await?;
            }
        }
    }

    println!("Seeded streaming accounts");
    Ok(())
}
