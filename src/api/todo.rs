use crate::dto::{SetComplete, SetCompleted};
use crate::external_connections::TransactableExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, DomainErrorResponse, Json, Path, ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{ErrorResponse, IntoResponse, Response};
use axum::routing::{delete, post};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(create_todo, set_todo_complete, delete_todo, set_todo_completed))]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Adds routes under "/todos" to the application router
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/create",
            post(
                |State(app_state): AppState, Json(new_todo): Json<dto::NewTodo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    create_todo(new_todo, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/:todo_id/set-complete",
            post(
                |State(app_state): AppState,
                 Path(todo_id): Path<i32>,
                 Json(update): Json<SetComplete>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    set_todo_complete(todo_id, update, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/:todo_id/delete",
            delete(
                |State(app_state): AppState, Path(todo_id): Path<i32>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/:todo_id/set-completed",
            post(
                |State(app_state): AppState,
                 Path(todo_id): Path<i32>,
                 Json(update): Json<SetCompleted>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    set_todo_completed(todo_id, update, &mut ext_cxn, &todo_service).await
                },
            ),
        )
}

#[utoipa::path(
    post,
    path = "/todos/create",
    tag = TODO_API_GROUP,
    request_body = dto::NewTodo,
    responses(
        (status = 200, description = "Todo created", body = dto::TodoItem),
        (status = 400, description = "Invalid request body", body = BasicErrorResponse),
        (status = 404, description = "The todo's list does not exist", body = BasicErrorResponse),
        (status = 500, description = "Could not store the todo", body = BasicErrorResponse),
    ),
)]
/// Creates a todo in an existing list
async fn create_todo(
    new_todo: dto::NewTodo,
    ext_cxn: &mut impl TransactableExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Json<dto::TodoItem>, ErrorResponse> {
    info!("Creating todo {new_todo}");
    new_todo.validate().map_err(ValidationErrorResponse::from)?;

    let list_detect = persistence::db_list_driven_ports::DbDetectList;
    let todo_write = persistence::db_todo_driven_ports::DbTodoWriter;
    let domain_todo = domain::todo::NewTodo::from(new_todo);

    let created = todo_service
        .create_todo(&domain_todo, &mut *ext_cxn, &list_detect, &todo_write)
        .await
        .map_err(DomainErrorResponse::from)?;

    Ok(Json(dto::TodoItem::from(created)))
}

#[utoipa::path(
    post,
    path = "/todos/{todo_id}/set-complete",
    tag = TODO_API_GROUP,
    params(("todo_id" = i32, Path, description = "ID of the todo to update")),
    request_body = SetComplete,
    responses(
        (status = 302, description = "Todo updated, redirecting to the index"),
        (status = 400, description = "Invalid request body", body = BasicErrorResponse),
        (status = 404, description = "The todo does not exist", body = BasicErrorResponse),
        (status = 500, description = "Could not update the todo", body = BasicErrorResponse),
    ),
)]
/// Sets a todo's completion state, then sends the caller back to the index page
async fn set_todo_complete(
    todo_id: i32,
    update: SetComplete,
    ext_cxn: &mut impl TransactableExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Response, ErrorResponse> {
    info!("Setting todo {todo_id} complete = {}", update.complete);
    update_completion(todo_id, update.complete, ext_cxn, todo_service).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, "/")]).into_response())
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}/delete",
    tag = TODO_API_GROUP,
    params(("todo_id" = i32, Path, description = "ID of the todo to delete")),
    responses(
        (status = 200, description = "Todo deleted", body = dto::Success),
        (status = 404, description = "The todo does not exist", body = BasicErrorResponse),
        (status = 500, description = "Could not delete the todo", body = BasicErrorResponse),
    ),
)]
/// Deletes a todo
async fn delete_todo(
    todo_id: i32,
    ext_cxn: &mut impl TransactableExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<Json<dto::Success>, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    let todo_read = persistence::db_todo_driven_ports::DbTodoReader;
    let todo_write = persistence::db_todo_driven_ports::DbTodoWriter;

    todo_service
        .delete_todo(todo_id, &mut *ext_cxn, &todo_read, &todo_write)
        .await
        .map_err(DomainErrorResponse::from)?;

    Ok(Json(dto::Success::new()))
}

#[utoipa::path(
    post,
    path = "/todos/{todo_id}/set-completed",
    tag = TODO_API_GROUP,
    params(("todo_id" = i32, Path, description = "ID of the todo to update")),
    request_body = SetCompleted,
    responses(
        (status = 200, description = "Todo updated"),
        (status = 400, description = "Invalid request body", body = BasicErrorResponse),
        (status = 404, description = "The todo does not exist", body = BasicErrorResponse),
        (status = 500, description = "Could not update the todo", body = BasicErrorResponse),
    ),
)]
/// Sets a todo's completion state and answers with an empty body
async fn set_todo_completed(
    todo_id: i32,
    update: SetCompleted,
    ext_cxn: &mut impl TransactableExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<StatusCode, ErrorResponse> {
    info!("Setting todo {todo_id} completed = {}", update.completed);
    update_completion(todo_id, update.completed, ext_cxn, todo_service).await?;

    Ok(StatusCode::OK)
}

async fn update_completion(
    todo_id: i32,
    complete: bool,
    ext_cxn: &mut impl TransactableExternalConnectivity,
    todo_service: &impl domain::todo::driving_ports::TodoPort,
) -> Result<(), DomainErrorResponse> {
    let todo_read = persistence::db_todo_driven_ports::DbTodoReader;
    let todo_write = persistence::db_todo_driven_ports::DbTodoWriter;

    todo_service
        .set_todo_complete(todo_id, complete, &mut *ext_cxn, &todo_read, &todo_write)
        .await?;

    Ok(())
}
