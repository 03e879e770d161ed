use crate::api::{swagger_main, todo, todo_list};
use crate::{SharedData, logging, persistence};
use axum::Router;
use std::sync::Arc;

/// Assembles every route of the application on top of the given connectivity
pub fn build_router(ext_cxn: persistence::ExternalConnectivity) -> Router {
    let shared_data = Arc::new(SharedData { ext_cxn });

    let router = Router::new()
        .merge(todo_list::list_routes())
        .nest("/todos", todo::todo_routes())
        .merge(swagger_main::build_documentation())
        .with_state(shared_data);

    logging::attach_tracing_http(router)
}
