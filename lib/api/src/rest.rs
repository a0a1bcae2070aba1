use crate::error::ApiError;
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use pathmatch_core::Embedder;
use pathmatch_moderation::{Moderator, MAX_CONTENT_CHARS};
use pathmatch_recommend::{
    recommend_jobs, recommend_mentors, recommend_users, JobRecommendation,
    MentorRecommendation, UserRecommendation, DEFAULT_JOB_TOP_N, DEFAULT_MENTOR_TOP_N,
    DEFAULT_USER_TOP_N,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Candidate pools travel in the request body, so allow generous payloads
const JSON_LIMIT: usize = 16 * 1024 * 1024;

/// Default result counts when a request does not carry `top_n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationLimits {
    pub users: usize,
    pub mentors: usize,
    pub jobs: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            users: DEFAULT_USER_TOP_N,
            mentors: DEFAULT_MENTOR_TOP_N,
            jobs: DEFAULT_JOB_TOP_N,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: None,
        }
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub embedder: Arc<dyn Embedder>,
    pub moderator: Arc<Moderator>,
    pub limits: RecommendationLimits,
}

impl AppState {
    pub fn new(embedder: Arc<dyn Embedder>, moderator: Moderator, limits: RecommendationLimits) -> Self {
        Self {
            embedder,
            moderator: Arc::new(moderator),
            limits,
        }
    }
}

#[derive(Deserialize)]
struct UserRequest {
    user_id: String,
    users: Vec<Value>,
    top_n: Option<usize>,
}

#[derive(Deserialize)]
struct MentorRecommendationRequest {
    student: Value,
    mentors: Vec<Value>,
    top_n: Option<usize>,
}

#[derive(Deserialize)]
struct JobRecommendationRequest {
    user: Value,
    jobs: Vec<Value>,
    top_n: Option<usize>,
}

#[derive(Deserialize)]
struct ContentRequest {
    content: String,
}

#[derive(Serialize)]
struct RecommendationsResponse<T> {
    recommendations: Vec<T>,
}

#[derive(Serialize)]
struct JobRecommendationsResponse {
    success: bool,
    recommendations: Vec<JobRecommendation>,
}

#[derive(Serialize)]
struct ModerationResponse {
    flagged: bool,
}

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    version: &'static str,
    embedder: &'a str,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: AppState, config: ServerConfig) -> std::io::Result<()> {
        let data = web::Data::new(state);
        let mut server = HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(data.clone())
                .configure(routes)
        });

        if let Some(workers) = config.workers {
            server = server.workers(workers);
        }

        server.bind((config.host.as_str(), config.port))?.run().await
    }
}

/// Register every endpoint; shared by the server and the tests
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health))
        .route("/recommend", web::post().to(recommend))
        .route("/recommend-mentors", web::post().to(recommend_mentors_handler))
        .route("/recommend-jobs", web::post().to(recommend_jobs_handler))
        .route("/moderate", web::post().to(moderate));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            let detail = err.to_string();
            warn!(error = %detail, "Rejected request body");
            ApiError::Unprocessable(detail).into()
        })
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        embedder: state.embedder.model_name(),
    })
}

async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<UserRequest>,
) -> Result<HttpResponse, ApiError> {
    let UserRequest {
        user_id,
        users,
        top_n,
    } = req.into_inner();
    info!(user_id = %user_id, users = users.len(), "Received user recommendation request");

    let top_n = top_n.unwrap_or(state.limits.users);
    let recommendations: Vec<UserRecommendation> =
        web::block(move || recommend_users(&user_id, &users, top_n)).await??;

    Ok(HttpResponse::Ok().json(RecommendationsResponse { recommendations }))
}

async fn recommend_mentors_handler(
    state: web::Data<AppState>,
    req: web::Json<MentorRecommendationRequest>,
) -> Result<HttpResponse, ApiError> {
    let MentorRecommendationRequest {
        student,
        mentors,
        top_n,
    } = req.into_inner();
    info!(mentors = mentors.len(), "Received mentor recommendation request");

    let top_n = top_n.unwrap_or(state.limits.mentors);
    let embedder = state.embedder.clone();
    let recommendations: Vec<MentorRecommendation> = web::block(move || {
        recommend_mentors(embedder.as_ref(), &student, &mentors, top_n)
    })
    .await??;

    Ok(HttpResponse::Ok().json(RecommendationsResponse { recommendations }))
}

async fn recommend_jobs_handler(
    state: web::Data<AppState>,
    req: web::Json<JobRecommendationRequest>,
) -> Result<HttpResponse, ApiError> {
    let JobRecommendationRequest { user, jobs, top_n } = req.into_inner();

    let top_n = top_n.unwrap_or(state.limits.jobs);
    let embedder = state.embedder.clone();
    let recommendations =
        web::block(move || recommend_jobs(embedder.as_ref(), &user, &jobs, top_n)).await??;

    Ok(HttpResponse::Ok().json(JobRecommendationsResponse {
        success: true,
        recommendations,
    }))
}

async fn moderate(
    state: web::Data<AppState>,
    req: web::Json<ContentRequest>,
) -> Result<HttpResponse, ApiError> {
    let content = req.into_inner().content;
    let chars = content.chars().count();
    if chars > MAX_CONTENT_CHARS {
        warn!(chars, "Rejected oversized moderation content");
        return Err(ApiError::Unprocessable(format!(
            "content exceeds {} characters",
            MAX_CONTENT_CHARS
        )));
    }

    let moderator = state.moderator.clone();
    let verdict = web::block(move || moderator.moderate(&content)).await?;
    Ok(HttpResponse::Ok().json(ModerationResponse {
        flagged: verdict.flagged,
    }))
}
