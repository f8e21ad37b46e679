// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use std::sync::Arc;

use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::aggregator::ExternalSourceClient;
use crate::environment::EnvironmentConfig;
use crate::notifier::Notifier;
use crate::search::JobFilters;
use crate::store::{Job, JobStore, SubscriptionStore};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/jobs", data = "<request>")]
pub async fn create_job(
    request: Json<CreateJobRequest>,
    jobs: &State<JobStore>,
    subscriptions: &State<SubscriptionStore>,
    notifier: &State<Arc<Notifier>>,
) -> Result<Json<CreateJobResponse>, status::Custom<Json<ValidationErrorResponse>>> {
    handlers::create_job_handler(request, jobs, subscriptions, notifier).await
}

#[get("/jobs")]
pub async fn list_jobs(jobs: &State<JobStore>) -> Json<Vec<Job>> {
    handlers::list_jobs_handler(jobs).await
}

#[get("/jobs/search?<title>&<company>&<location>")]
pub async fn search_jobs(
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    jobs: &State<JobStore>,
    aggregator: &State<ExternalSourceClient>,
) -> Result<Json<Vec<Job>>, status::Custom<Json<ValidationErrorResponse>>> {
    let filters = JobFilters {
        title,
        company,
        location,
    };
    handlers::search_jobs_handler(filters, jobs, aggregator).await
}

#[post("/subscribe", data = "<request>")]
pub async fn subscribe(
    request: Json<SubscribeRequest>,
    subscriptions: &State<SubscriptionStore>,
) -> Result<Json<SubscribeResponse>, status::Custom<Json<ValidationErrorResponse>>> {
    handlers::subscribe_handler(request, subscriptions).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    Json("OK")
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers

#[rocket::catch(400)]
pub fn bad_request() -> Json<ValidationErrorResponse> {
    Json(ValidationErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<ValidationErrorResponse> {
    Json(ValidationErrorResponse::new(
        "Request body is missing required fields or is malformed".to_string(),
        "VALIDATION_ERROR".to_string(),
        vec![],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ValidationErrorResponse> {
    Json(ValidationErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![],
    ))
}

/// Assemble the Rocket instance with its stores and collaborators. Kept
/// separate from launch so tests can drive it with a local client.
pub fn build_rocket(config: EnvironmentConfig) -> Result<Rocket<Build>> {
    let aggregator = ExternalSourceClient::new(
        config.external_source_url.clone(),
        config.external_timeout_seconds,
    )?;
    let notifier = Notifier::from_config(&config.smtp, EnvironmentConfig::smtp_password())?;

    Ok(rocket::build()
        .attach(Cors)
        .manage(JobStore::new())
        .manage(SubscriptionStore::new())
        .manage(aggregator)
        .manage(Arc::new(notifier))
        .register(
            "/",
            catchers![bad_request, unprocessable_entity, internal_error],
        )
        .mount(
            "/",
            routes![create_job, list_jobs, search_jobs, subscribe, health, options],
        ))
}

// Main server start function
pub async fn start_web_server(config: EnvironmentConfig) -> Result<()> {
    info!("Starting Jobberwocky job board API server");
    info!("External source: {}", config.external_source_url);
    info!("Mail relay: {}:{}", config.smtp.relay, config.smtp.port);

    let _rocket = build_rocket(config)?
        .launch()
        .await
        .context("Rocket server failed")?;

    Ok(())
}
