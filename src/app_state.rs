use std::sync::Arc;

use crate::service::TaskService;
use crate::store::TaskStore;

#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        AppState {
            tasks: TaskService::new(store),
        }
    }
}
