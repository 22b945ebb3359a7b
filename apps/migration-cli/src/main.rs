use clap::{Parser, ValueEnum};
use coffee_backend::config::db::{DbOwner, DbProfile};
use coffee_backend::infra::db::connect_db;
use migration::{migrate, seed_sample_drinks, MigrationCommand};

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    /// Drop every table and re-apply all migrations (wipes all drinks)
    Fresh,
    Reset,
    Refresh,
    Status,
    /// Insert the sample "water" drink
    Seed,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Coffee shop database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Runtime environment (selects PROD_DB or TEST_DB unless DATABASE_URL is set)
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let profile = match args.env {
        Env::Prod => DbProfile::Prod,
        Env::Test => DbProfile::Test,
    };

    let db = match connect_db(profile, DbOwner::Owner).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Command::Seed => seed_sample_drinks(&db).await.map(|_| ()),
        Command::Up => migrate(&db, MigrationCommand::Up).await,
        Command::Down => migrate(&db, MigrationCommand::Down).await,
        Command::Fresh => migrate(&db, MigrationCommand::Fresh).await,
        Command::Reset => migrate(&db, MigrationCommand::Reset).await,
        Command::Refresh => migrate(&db, MigrationCommand::Refresh).await,
        Command::Status => migrate(&db, MigrationCommand::Status).await,
    };

    if let Err(e) = db.close().await {
        tracing::warn!("failed to close connection cleanly: {e}");
    }

    if let Err(e) = result {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
