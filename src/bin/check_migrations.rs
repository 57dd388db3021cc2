// src/bin/check_migrations.rs
//
// Compara as migrações embutidas no binário com as aplicadas no banco.
// Sai com código 1 quando há migração pendente (útil em deploy).
//
//   cargo run --bin check_migrations

use sqlx::postgres::PgPoolOptions;
use std::collections::HashSet;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).compact().init();
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    // A tabela _sqlx_migrations pode nem existir em um banco recém-criado
    let applied: HashSet<i64> =
        sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations ORDER BY version")
            .fetch_all(&pool)
            .await
            .unwrap_or_default()
            .into_iter()
            .collect();

    let migrator = sqlx::migrate!();
    let mut pending = 0;

    for migration in migrator.iter() {
        if applied.contains(&migration.version) {
            tracing::info!("✅ {} {} (aplicada)", migration.version, migration.description);
        } else {
            tracing::warn!("⏳ {} {} (PENDENTE)", migration.version, migration.description);
            pending += 1;
        }
    }

    if pending > 0 {
        tracing::error!("{} migração(ões) pendente(s).", pending);
        std::process::exit(1);
    }

    tracing::info!("Todas as migrações estão aplicadas.");
    Ok(())
}
