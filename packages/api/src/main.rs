use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use api::state::AppState;
use shared::repositories::game_repository::{DynamoDbGameRepository, GameRepository};
use shared::repositories::in_memory_game_repository::InMemoryGameRepository;
use shared::services::game_service::GameService;
use shared::services::realtime_service::RealtimeService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let allowed_origin =
        std::env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    // Backend selection happens once, here: a configured table means
    // DynamoDB, otherwise games live in process memory.
    let repository: Arc<dyn GameRepository + Send + Sync> = match std::env::var("GAMES_TABLE") {
        Ok(table_name) => {
            let config = aws_config::load_from_env().await;
            let client = aws_sdk_dynamodb::Client::new(&config);
            if let Err(e) = client.describe_table().table_name(&table_name).send().await {
                error!("Cannot reach games table {}: {}", table_name, e);
                return Err(format!("games table {} is not reachable", table_name).into());
            }
            info!("Using DynamoDB games table {}", table_name);
            Arc::new(DynamoDbGameRepository::new(client, table_name))
        }
        Err(_) => {
            info!("No games table configured, using in-memory storage");
            Arc::new(InMemoryGameRepository::new())
        }
    };

    let realtime_service = Arc::new(RealtimeService::new());
    let game_service = Arc::new(GameService::new(repository, realtime_service.clone()));

    let app_state = AppState {
        game_service,
        realtime_service,
    };

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin.parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::app(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
