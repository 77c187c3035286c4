use super::store;
use crate::db::Database;
use crate::error::{respond_with, ServiceError};
use crate::events::DataEvents;
use crate::services::library::store::{data_from_json, insert_item};
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::model::library::LibraryCategory;
use common::model::use_case::UseCaseDetail;
use log::info;
use serde_json::Value;

pub(crate) async fn process(
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    body: web::Json<Value>,
) -> impl Responder {
    match create_use_case(&db, body.into_inner()) {
        Ok(use_case) => {
            events.publish(DataEvent::LibraryChanged {
                category: LibraryCategory::UseCases,
            });
            HttpResponse::Created().json(use_case)
        }
        Err(e) => respond_with("Failed to create use case", e),
    }
}

fn create_use_case(db: &Database, body: Value) -> Result<UseCaseDetail, ServiceError> {
    let data = data_from_json(LibraryCategory::UseCases, body)?;
    let conn = db.open()?;
    let item = insert_item(&conn, &data, true)?;
    info!("Created custom use case {} ({})", item.id, item.data.label());
    store::find_detail(&conn, item.id)
}
