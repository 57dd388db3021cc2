// src/bin/reset_db.rs
//
// Utilitário de manutenção, rodado manualmente fora do caminho das
// requisições: apaga o schema, recria e aplica as migrações embutidas.
//
//   cargo run --bin reset_db -- --yes

use sqlx::postgres::PgPoolOptions;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).compact().init();
    dotenvy::dotenv().ok();

    // Comando destrutivo: exige confirmação explícita
    if !env::args().any(|arg| arg == "--yes") {
        eprintln!("Este comando APAGA todos os dados do banco.");
        eprintln!("Rode novamente com --yes para confirmar.");
        std::process::exit(2);
    }

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    tracing::warn!("🗑️  Apagando o schema public...");
    sqlx::query("DROP SCHEMA public CASCADE").execute(&pool).await?;
    sqlx::query("CREATE SCHEMA public").execute(&pool).await?;

    sqlx::migrate!().run(&pool).await?;

    tracing::info!("✅ Banco recriado e migrações aplicadas com sucesso!");
    Ok(())
}
