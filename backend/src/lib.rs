//! NAC deployment planner backend: an actix-web JSON API over a SQLite store.
//!
//! `main.rs` wires these modules into a running server; integration tests
//! build the same application through [`configure_services`].

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod job_controller;
pub mod services;

use actix_web::web;

/// Registers every API scope and the query-string error handler. Shared
/// state (`Database`, `JobsState`, `DataEvents`, `AppConfig`) and the JSON
/// config are expected as `app_data` on the `App`.
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::query_config())
        .service(services::sites::configure_routes())
        .service(services::library::configure_routes())
        .service(services::use_cases::configure_routes())
        .service(services::rbac::configure_routes())
        .service(services::policies::configure_routes())
        .service(services::analytics::configure_routes())
        .service(services::events::configure_routes())
        .service(services::demo::configure_routes());
}
