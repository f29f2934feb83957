use clap::{Parser, Subcommand};
use client::{ApiClient, ClientError};
use std::path::PathBuf;
use storage::dto::registration::RegistrationRequest;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "registerctl")]
#[command(about = "Candystore competitions API client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "API_URL", default_value = "http://127.0.0.1:8080")]
    api_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List all competitions
    Competitions,
    /// Show one competition by its public id
    Show { id: i32 },
    /// Page through a competition's registrations
    Registrations {
        id: i32,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        limit: u32,

        #[arg(long)]
        sort: Option<String>,
    },
    /// Register a team from a JSON payload file
    Register { id: i32, file: PathBuf },
    /// Show the currently featured comic
    ComicOfMonth,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("registerctl={},client={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = ApiClient::new(cli.api_url);

    match cli.command {
        Commands::Competitions => list_competitions(&client).await?,
        Commands::Show { id } => show_competition(&client, id).await?,
        Commands::Registrations {
            id,
            page,
            limit,
            sort,
        } => list_registrations(&client, id, page, limit, sort.as_deref()).await?,
        Commands::Register { id, file } => register(&client, id, file).await?,
        Commands::ComicOfMonth => comic_of_month(&client).await?,
    }

    Ok(())
}

async fn list_competitions(client: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let competitions = client.list_competitions().await?;

    tracing::info!("{} competition(s)", competitions.len());
    for competition in competitions {
        tracing::info!(
            "  [{}] {} ({}, {} participants)",
            competition.id,
            competition.title,
            competition.status,
            competition.participants
        );
    }

    Ok(())
}

async fn show_competition(client: &ApiClient, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let competition = client.get_competition(id).await?;

    tracing::info!("{} ({})", competition.title, competition.status);
    tracing::info!("  slug: {}", competition.slug);
    tracing::info!("  prize: {}", competition.prize);
    tracing::info!("  participants: {}", competition.participants);
    if let Some(start) = competition.start_date {
        tracing::info!("  starts: {}", start);
    }
    if let Some(end) = competition.end_date {
        tracing::info!("  ends: {}", end);
    }
    for rule in competition.rules.iter() {
        tracing::info!("  rule: {}", rule);
    }

    Ok(())
}

async fn list_registrations(
    client: &ApiClient,
    id: i32,
    page: u32,
    limit: u32,
    sort: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let listing = client.list_registrations(id, page, limit, sort).await?;

    tracing::info!(
        "Page {}/{} ({} registration(s) total)",
        listing.pagination.current_page,
        listing.pagination.total_pages,
        listing.pagination.total_registrations
    );
    for registration in listing.data {
        let data = &registration.registration_data;
        let registered_at = registration
            .metadata
            .registration_timestamp
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_default();

        tracing::info!(
            "  {} led by {} <{}> at {}",
            data.team_name,
            data.team_leader_name,
            data.email,
            registered_at
        );
    }

    Ok(())
}

async fn register(
    client: &ApiClient,
    id: i32,
    file: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading registration payload from: {}", file.display());

    let payload = tokio::fs::read_to_string(&file).await?;
    let request: RegistrationRequest = serde_json::from_str(&payload)?;

    match client.register(id, &request).await {
        Ok(confirmation) => {
            tracing::info!(
                "Registered team {} for {} (registration {})",
                confirmation.team_name,
                confirmation.competition_title,
                confirmation.registration_id
            );
            Ok(())
        }
        Err(ClientError::ApiError {
            status,
            message,
            errors,
        }) => {
            tracing::error!("Registration rejected ({}): {}", status, message);
            for line in errors {
                tracing::error!("  {}", line);
            }
            Err(format!("registration failed with status {status}").into())
        }
        Err(error) => Err(error.into()),
    }
}

async fn comic_of_month(client: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let comic = client.comic_of_month().await?;

    tracing::info!("Comic of the month: {} ({})", comic.title, comic.slug);
    tracing::info!("  {}", comic.description);

    Ok(())
}
