use clap::{Parser, Subcommand};
use homeplan::Config;

#[derive(Parser)]
#[command(name = "homeplan")]
#[command(about = "Household meal planning and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create the database and apply migrations
    Migrate,
    /// Generate a shopping list for a meal plan and print it as JSON
    Generate {
        #[arg(long)]
        tenant: String,
        #[arg(long)]
        meal_plan: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    config.validate().map_err(anyhow::Error::msg)?;

    homeplan::observability::init_observability(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => homeplan::server::serve(config, host, port).await?,
        Commands::Migrate => homeplan::migrate::migrate(&config).await?,
        Commands::Generate { tenant, meal_plan } => {
            generate_command(&config, &tenant, &meal_plan).await?
        }
    }

    Ok(())
}

async fn generate_command(config: &Config, tenant: &str, meal_plan: &str) -> anyhow::Result<()> {
    let pool = homeplan::db::create_pool(&config.database.url, 1).await?;
    let command = homeplan_shopping::Command::new(homeplan_shared::State::single(pool.clone()));

    let list = command.generate(meal_plan, tenant).await?;
    println!("{}", serde_json::to_string_pretty(&list)?);

    pool.close().await;

    Ok(())
}
