// src/tasks.rs

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::models::TaskPayload;
use crate::validation::validate_task;

/// GET /api/tasks
/// List the caller's tasks, newest first.
pub async fn list_tasks(
    user: CurrentUser,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let tasks = data.tasks.list(&user.0).await?;
    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// GET /api/tasks/stats
/// Dashboard counts for the caller.
pub async fn task_stats(
    user: CurrentUser,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let stats = data.tasks.stats(&user.0).await?;
    Ok(HttpResponse::Ok().json(json!({ "stats": stats })))
}

/// POST /api/tasks
pub async fn create_task(
    user: CurrentUser,
    data: web::Data<AppState>,
    payload: web::Json<TaskPayload>,
) -> Result<HttpResponse, ApiError> {
    let fields = validate_task(&payload)?;
    let task = data.tasks.create(&user.0, fields).await?;
    Ok(HttpResponse::Created().json(json!({ "task": task })))
}

/// PUT /api/tasks/{task_id}
/// Body is validated before the task is looked up.
pub async fn update_task(
    user: CurrentUser,
    data: web::Data<AppState>,
    task_id: web::Path<String>,
    payload: web::Json<TaskPayload>,
) -> Result<HttpResponse, ApiError> {
    let fields = validate_task(&payload)?;
    let task = data.tasks.update(&task_id, &user.0, fields).await?;
    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// DELETE /api/tasks/{task_id}
pub async fn delete_task(
    user: CurrentUser,
    data: web::Data<AppState>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    data.tasks.delete(&task_id, &user.0).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}
