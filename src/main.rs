// src/main.rs

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use task_tracker::app_state::AppState;
use task_tracker::auth::Authentication;
use task_tracker::config::{Config, StoreBackend};
use task_tracker::configure;
use task_tracker::store::{MemoryTaskStore, MongoTaskStore, TaskStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let store: Arc<dyn TaskStore> = match (config.store_backend, &config.mongo_uri) {
        (StoreBackend::Mongo, Some(uri)) => {
            let store = MongoTaskStore::connect(uri, &config.database_name)
                .await
                .map_err(|e| {
                    error!("Failed to connect to MongoDB: {}", e);
                    io::Error::other(e)
                })?;
            Arc::new(store)
        }
        (StoreBackend::Mongo, None) => {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "MONGO_URI must be set"));
        }
        (StoreBackend::Memory, _) => {
            info!("Using in-memory task store; tasks are lost on restart");
            Arc::new(MemoryTaskStore::new())
        }
    };
    let state = web::Data::new(AppState::new(store));

    let frontend_origin = config.frontend_origin.clone();
    let jwt_secret = config.jwt_secret.clone();

    info!("Server running at http://{}", config.bind_address);
    info!("Allowed CORS Origin: {}", frontend_origin);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                http::header::CONTENT_TYPE,
                http::header::ACCEPT,
                http::header::AUTHORIZATION,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Authentication::new(&jwt_secret))
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
