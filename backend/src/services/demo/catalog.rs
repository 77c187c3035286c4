//! `GET /api/demo/scenarios`: the fixed industry presets and their target counts.

use actix_web::{HttpResponse, Responder};
use common::model::demo::DemoScenario;

pub(crate) async fn process() -> impl Responder {
    HttpResponse::Ok().json(DemoScenario::presets())
}
