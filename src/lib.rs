pub mod app_state;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod models;
pub mod service;
pub mod store;
pub mod task_list;
pub mod tasks;
pub mod validation;

use actix_web::web;

use crate::error::ApiError;
use crate::tasks::{create_task, delete_task, list_tasks, task_stats, update_task};

/// Registers the task routes. Callers wrap the app in
/// [`auth::Authentication`] and provide [`app_state::AppState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::InvalidBody(err.to_string()).into()),
    )
    .service(
        web::scope("/api/tasks")
            .route("", web::get().to(list_tasks))
            .route("", web::post().to(create_task))
            .route("/stats", web::get().to(task_stats))
            .route("/{task_id}", web::put().to(update_task))
            .route("/{task_id}", web::delete().to(delete_task)),
    );
}
