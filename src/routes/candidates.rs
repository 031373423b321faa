use actix_web::{web, HttpResponse, Responder};

use crate::core::search_candidates;
use crate::models::{ErrorResponse, SearchCandidatesRequest, SearchCandidatesResponse};
use crate::routes::AppState;

/// Configure candidate lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/candidates/search", web::get().to(search))
        .route("/candidates/{id}", web::get().to(get_candidate));
}

/// Resolve a full profile from a match result id
///
/// GET /api/v1/candidates/{id}
async fn get_candidate(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.engine.directory().get_candidate(&id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Candidate not found".to_string(),
            message: format!("No candidate with id {}", id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch candidate {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch candidate".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Keyword search over names, skills and bios
///
/// GET /api/v1/candidates/search?q={term}&limit={n}
async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchCandidatesRequest>,
) -> impl Responder {
    let query = query.into_inner();
    let limit = query.limit.min(state.matching.max_limit);

    let pool = match state.engine.directory().list_candidates().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to list candidates for search: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let results: Vec<_> = search_candidates(&query.q, &pool, limit)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!("Search {:?} matched {} candidates", query.q, results.len());

    HttpResponse::Ok().json(SearchCandidatesResponse {
        query: query.q,
        count: results.len(),
        results,
    })
}
