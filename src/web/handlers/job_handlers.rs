// src/web/handlers/job_handlers.rs
use std::sync::Arc;

use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;
use validator::Validate;

use super::unprocessable;
use crate::aggregator::ExternalSourceClient;
use crate::notifier::Notifier;
use crate::search::{self, JobFilters};
use crate::store::{Job, JobStore, SubscriptionStore};
use crate::web::types::{
    CreateJobRequest, CreateJobResponse, FieldError, ValidationErrorResponse,
};

pub async fn create_job_handler(
    request: Json<CreateJobRequest>,
    jobs: &State<JobStore>,
    subscriptions: &State<SubscriptionStore>,
    notifier: &State<Arc<Notifier>>,
) -> Result<Json<CreateJobResponse>, status::Custom<Json<ValidationErrorResponse>>> {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return Err(unprocessable(ValidationErrorResponse::from_validation_errors(&errors)));
    }

    let job = Job::new(
        &request.title,
        &request.company,
        &request.location,
        &request.description,
    );
    jobs.append(job.clone());

    info!("Created job '{}' at {} ({})", job.title, job.company, job.id);

    // Deliveries are best-effort and must not delay the creation response.
    let recipients = subscriptions.list();
    let notifier = Arc::clone(notifier.inner());
    let created = job.clone();
    tokio::spawn(async move {
        notifier.notify_subscribers(&created, &recipients).await;
    });

    Ok(Json(CreateJobResponse {
        message: "Job created".to_string(),
        job,
    }))
}

pub async fn list_jobs_handler(jobs: &State<JobStore>) -> Json<Vec<Job>> {
    Json(jobs.list())
}

pub async fn search_jobs_handler(
    filters: JobFilters,
    jobs: &State<JobStore>,
    aggregator: &State<ExternalSourceClient>,
) -> Result<Json<Vec<Job>>, status::Custom<Json<ValidationErrorResponse>>> {
    if let Err(invalid) = filters.validate() {
        return Err(unprocessable(ValidationErrorResponse::new(
            "Invalid search query".to_string(),
            "VALIDATION_ERROR".to_string(),
            vec![FieldError {
                field: invalid.param.to_string(),
                message: invalid.message,
            }],
        )));
    }

    // Snapshot the store before the external fetch so the lock is never held
    // across an await.
    let local = jobs.list();
    let external = aggregator.fetch().await;

    let merged = search::merge(local, external);
    Ok(Json(filters.apply(merged)))
}
