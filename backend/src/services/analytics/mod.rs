//! # Analytics Service Module
//!
//! `GET /api/analytics/summary`: roll-up figures computed from the current
//! store on every request. Nothing is cached.

pub mod summary;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/analytics";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/summary", get().to(summary::process))
}
