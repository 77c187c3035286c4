//! # Demo Service Module
//!
//! Seeds the store with an industry-flavoured data set so the planner can be
//! explored without manual entry, and wipes it again.
//!
//! ## Sub-modules:
//! - `scenarios`: preset data generation and the transactional write/clear.
//! - `load`: schedules the staged background job.
//! - `status`, `clear`, `catalog`: the remaining handlers.

mod catalog;
mod clear;
pub mod load;
pub mod scenarios;
mod status;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/demo";

/// Configures and returns the Actix `Scope` for the demo routes.
///
/// # Registered Routes:
///
/// *   **`GET /scenarios`** → `catalog::process`: the seven presets.
/// *   **`POST /load`** → `load::process`: `{ scenario }` in, `{ job_id }` out.
/// *   **`GET /status/{job_id}`** → `status::process`: the job's `JobStatus`.
/// *   **`POST /clear`** → `clear::process`: removes all planning data.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/scenarios", get().to(catalog::process))
        .route("/load", post().to(load::process))
        .route("/status/{job_id}", get().to(status::process))
        .route("/clear", post().to(clear::process))
}
