use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use skillswap_match::config::{DirectoryBackend, Settings};
use skillswap_match::core::MatchEngine;
use skillswap_match::routes::{self, AppState};
use skillswap_match::services::{
    CandidateDirectory, GenerativeSettings, GenerativeSuggester, InMemoryDirectory, NullSuggester,
    PostgresDirectory, Suggester,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn build_directory(settings: &Settings) -> std::io::Result<Arc<dyn CandidateDirectory>> {
    let dir = &settings.directory;

    match dir.backend {
        DirectoryBackend::Memory => {
            let directory = match &dir.seed_path {
                Some(path) => InMemoryDirectory::from_json_file(path)
                    .map_err(|e| io_error("Failed to load candidate seed", e))?,
                None => {
                    warn!("No directory.seed_path configured, starting with an empty directory");
                    InMemoryDirectory::default()
                }
            };
            Ok(Arc::new(directory))
        }
        DirectoryBackend::Postgres => {
            let url = dir
                .database_url
                .as_deref()
                .ok_or_else(|| io_error("PostgreSQL directory", "directory.database_url is not set"))?;

            let directory = PostgresDirectory::from_settings(
                url,
                dir.max_connections,
                dir.min_connections,
                dir.acquire_timeout_secs,
                dir.idle_timeout_secs,
            )
            .await
            .map_err(|e| io_error("Failed to connect to PostgreSQL", e))?;

            if let Some(path) = &dir.seed_path {
                let seed = InMemoryDirectory::from_json_file(path)
                    .map_err(|e| io_error("Failed to load candidate seed", e))?;
                let profiles = seed
                    .list_candidates()
                    .await
                    .map_err(|e| io_error("Failed to read candidate seed", e))?;
                directory
                    .seed(&profiles)
                    .await
                    .map_err(|e| io_error("Failed to seed PostgreSQL directory", e))?;
            }

            Ok(Arc::new(directory))
        }
    }
}

fn build_suggester(settings: &Settings) -> Arc<dyn Suggester> {
    let s = &settings.suggester;

    if !s.enabled {
        info!("Suggestion backend disabled, serving deterministic matches only");
        return Arc::new(NullSuggester);
    }

    if s.api_key.is_none() {
        warn!("Suggestion backend enabled without an API key; requests may be rejected");
    }

    info!("Suggestion backend: {} (model {}, timeout {}ms)", s.base_url, s.model, s.timeout_ms);

    Arc::new(GenerativeSuggester::new(GenerativeSettings {
        base_url: s.base_url.clone(),
        api_key: s.api_key.clone(),
        model: s.model.clone(),
        temperature: s.temperature,
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // SKILLSWAP_CONFIG points at a single config file instead of config/
    let settings = match std::env::var("SKILLSWAP_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    }
    .map_err(|e| io_error("Configuration error", e))?;

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting SkillSwap matching service...");

    let directory = build_directory(&settings).await?;
    info!("Candidate directory initialized ({})", directory.backend_name());

    let suggester = build_suggester(&settings);

    let engine = MatchEngine::new(directory, suggester)
        .with_settings(settings.matching.aggregation())
        .with_ai_timeout(settings.suggester.timeout())
        .with_max_roster(settings.suggester.max_roster);

    info!("Match engine initialized with {:?}", settings.matching.aggregation());

    let app_state = AppState {
        engine,
        matching: settings.matching.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
