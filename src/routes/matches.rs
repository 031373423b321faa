use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::{MatchEngine, MatchError};
use crate::models::{ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchEngine,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let directory = state.engine.directory();
    let healthy = directory.health_check().await;

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        directory: directory.backend_name().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "skillsOffered": ["React Development"],
///   "skillsDesired": "Marketing, SEO",
///   "contextDescription": "string",
///   "requesterId": "string",
///   "limit": 20
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let limit = state.matching.effective_limit(req.limit);
    let query = req.into_query();

    tracing::info!(
        "Finding matches: offered={:?}, desired={:?}, limit={}",
        query.skills_offered,
        query.skills_desired,
        limit
    );

    match state.engine.find_matches(&query).await {
        Ok(mut outcome) => {
            outcome.results.truncate(limit);

            HttpResponse::Ok().json(FindMatchesResponse {
                query_id: outcome.query_id.to_string(),
                matches: outcome.results,
                total_candidates: outcome.total_candidates,
                ai_status: outcome.ai_status,
            })
        }
        Err(MatchError::Validation(errors)) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid search input".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }),
        Err(e @ MatchError::Directory(_)) => {
            tracing::error!("Failed to find matches: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
