//! # Demo Job Status
//!
//! `GET /api/demo/status/{job_id}` reads the job map kept by the job
//! controller. Clients poll it after `POST /api/demo/load` until the status is
//! `completed` or `failed`.

use crate::error::{respond_with, ServiceError};
use crate::job_controller::state::JobsState;
use actix_web::{web, HttpResponse, Responder};

/// # Arguments
/// * `job_id` - Id returned by the load request.
///
/// # Returns
/// - `200 OK` with the `JobStatus` (progress and current stage while running).
/// - `404 Not Found` for an id this process never issued.
pub(crate) async fn process(state: web::Data<JobsState>, job_id: web::Path<String>) -> impl Responder {
    match state.status(&job_id).await {
        Some(status) => HttpResponse::Ok().json(status),
        None => respond_with(
            "Failed to read job status",
            ServiceError::not_found("Job", job_id.as_str()),
        ),
    }
}
