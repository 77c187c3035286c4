use actix_web::{web, App, HttpServer};
use backend::config::AppConfig;
use backend::db::Database;
use backend::error::json_config;
use backend::events::DataEvents;
use backend::job_controller::state::{self, JobsState};
use env_logger::Env;
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let db = Database::new(config.database_path.clone());
    db.initialize().map_err(|e| {
        error!("Failed to initialize database {}: {}", db.path().display(), e);
        std::io::Error::other(e.to_string())
    })?;
    info!("Using database {}", db.path().display());

    // Initialize job controller state
    let (jobs_state, rx) = JobsState::new();

    // Start job updater task
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        state::start_job_updater(updater_state, rx).await;
    });

    let events = DataEvents::new();
    let json_limit = config.json_limit;
    let bind = (config.host.clone(), config.port);
    info!("Server running at {}", config.url());

    HttpServer::new(move || {
        App::new()
            .app_data(json_config(json_limit))
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(web::Data::new(events.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(backend::configure_services)
    })
    .bind(bind)?
    .run()
    .await
}
