//! # Data Event Stream
//!
//! `GET /api/events` keeps a `text/event-stream` response open and writes
//! one `data: {json}` frame per published `DataEvent`. A subscriber that
//! falls behind the broadcast buffer skips the events it missed.

use crate::events::DataEvents;
use actix_web::web::{get, scope, Bytes};
use actix_web::{web, HttpResponse, Responder, Scope};
use common::events::DataEvent;
use futures_util::stream;
use log::{debug, warn};
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;

const API_PATH: &str = "/api/events";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

/// One SSE frame.
pub fn frame(event: &DataEvent) -> Result<Bytes, serde_json::Error> {
    Ok(Bytes::from(format!("data: {}\n\n", serde_json::to_string(event)?)))
}

async fn process(events: web::Data<DataEvents>) -> impl Responder {
    let rx = events.subscribe();
    debug!("Event stream subscriber connected");

    let body = stream::unfold(rx, |mut rx| async move {
        loop {
            let event = match rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream subscriber lagged by {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => return None,
            };
            match frame(&event) {
                Ok(bytes) => return Some((Ok::<_, Infallible>(bytes), rx)),
                Err(e) => warn!("Skipping unserializable event {:?}: {}", event, e),
            }
        }
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(body)
}
