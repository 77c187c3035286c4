//! Child rows hung off a use case: documentation links and success criteria.

use super::store;
use crate::db::Database;
use crate::error::respond_with;
use crate::events::DataEvents;
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::library::LibraryCategory;
use common::model::use_case::{NewDocumentationLink, NewSuccessCriterion};

pub(crate) async fn documentation_link(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
    payload: web::Json<NewDocumentationLink>,
) -> impl Responder {
    let result = db
        .open()
        .and_then(|conn| store::add_documentation_link(&conn, id.into_inner(), payload.into_inner()));
    match result {
        Ok(link) => {
            events.publish(DataEvent::LibraryChanged {
                category: LibraryCategory::UseCases,
            });
            HttpResponse::Created().json(link)
        }
        Err(e) => respond_with("Failed to add documentation link", e),
    }
}

pub(crate) async fn success_criterion(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    id: web::Path<i64>,
    payload: web::Json<NewSuccessCriterion>,
) -> impl Responder {
    let result = db
        .open()
        .and_then(|conn| store::add_success_criterion(&conn, id.into_inner(), payload.into_inner()));
    match result {
        Ok(criterion) => {
            events.publish(DataEvent::LibraryChanged {
                category: LibraryCategory::UseCases,
            });
            HttpResponse::Created().json(criterion)
        }
        Err(e) => respond_with("Failed to add success criterion", e),
    }
}
