use crate::external_connections::TransactableExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, DomainErrorResponse, Json, Path, ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence, view};
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{ErrorResponse, Html, IntoResponse, Response};
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(index, list_page, create_list, delete_list, complete_list))]
/// Defines the OpenAPI documentation for the todo list API
pub struct ListApi;
/// Constant used to group todo list endpoints in OpenAPI documentation
pub const LIST_API_GROUP: &str = "Todo Lists";

/// The list the index page sends visitors to
const DEFAULT_LIST_ID: i32 = 1;

/// Adds the index route and routes under "/lists" to the application router
pub fn list_routes() -> Router<Arc<SharedData>> {
    let list_router = Router::new()
        .route(
            "/:list_id",
            get(
                |State(app_state): AppState, Path(list_id): Path<i32>, headers: HeaderMap| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let list_service = domain::todo_list::ListService {};

                    list_page(list_id, &headers, &mut ext_cxn, &list_service).await
                },
            ),
        )
        .route(
            "/create",
            post(
                |State(app_state): AppState, Json(new_list): Json<dto::NewList>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let list_service = domain::todo_list::ListService {};

                    create_list(new_list, &mut ext_cxn, &list_service).await
                },
            ),
        )
        .route(
            "/:list_id/delete",
            delete(
                |State(app_state): AppState, Path(list_id): Path<i32>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let list_service = domain::todo_list::ListService {};

                    delete_list(list_id, &mut ext_cxn, &list_service).await
                },
            ),
        )
        .route(
            "/:list_id/set-completed",
            post(
                |State(app_state): AppState, Path(list_id): Path<i32>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let list_service = domain::todo_list::ListService {};

                    complete_list(list_id, &mut ext_cxn, &list_service).await
                },
            ),
        );

    Router::new()
        .route("/", get(index))
        .nest("/lists", list_router)
}

#[utoipa::path(
    get,
    path = "/",
    tag = LIST_API_GROUP,
    responses(
        (status = 302, description = "Redirect to the default list's page"),
    ),
)]
/// Sends visitors to the default list
async fn index() -> Response {
    let location = format!("/lists/{DEFAULT_LIST_ID}");
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

#[utoipa::path(
    get,
    path = "/lists/{list_id}",
    tag = LIST_API_GROUP,
    params(("list_id" = i32, Path, description = "ID of the list to show")),
    responses(
        (status = 200, description = "The list's page. Rendered as HTML unless JSON is requested via the Accept header", body = dto::ListPage),
        (status = 500, description = "Could not load the page", body = BasicErrorResponse),
    ),
)]
/// Shows every list, plus the selected list and its todos
async fn list_page(
    list_id: i32,
    headers: &HeaderMap,
    ext_cxn: &mut impl TransactableExternalConnectivity,
    list_service: &impl domain::todo_list::driving_ports::ListPort,
) -> Result<Response, ErrorResponse> {
    info!("Showing list {list_id}");
    let list_read = persistence::db_list_driven_ports::DbListReader;
    let todo_read = persistence::db_todo_driven_ports::DbTodoReader;

    let page = list_service
        .list_page(list_id, &mut *ext_cxn, &list_read, &todo_read)
        .await
        .map_err(DomainErrorResponse::from)?;

    if wants_json(headers) {
        Ok(Json(dto::ListPage::from(page)).into_response())
    } else {
        Ok(Html(view::render_list_page(&page)).into_response())
    }
}

/// True if the client's Accept header prefers JSON over a rendered page
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

#[utoipa::path(
    post,
    path = "/lists/create",
    tag = LIST_API_GROUP,
    request_body = dto::NewList,
    responses(
        (status = 200, description = "List created", body = dto::TodoList),
        (status = 400, description = "Invalid request body", body = BasicErrorResponse),
        (status = 500, description = "Could not store the list", body = BasicErrorResponse),
    ),
)]
/// Creates a new, empty todo list
async fn create_list(
    new_list: dto::NewList,
    ext_cxn: &mut impl TransactableExternalConnectivity,
    list_service: &impl domain::todo_list::driving_ports::ListPort,
) -> Result<Json<dto::TodoList>, ErrorResponse> {
    info!("Creating todo list {new_list}");
    new_list.validate().map_err(ValidationErrorResponse::from)?;

    let list_write = persistence::db_list_driven_ports::DbListWriter;
    let domain_list = domain::todo_list::NewList::from(new_list);

    let created = list_service
        .create_list(&domain_list, &mut *ext_cxn, &list_write)
        .await
        .map_err(DomainErrorResponse::from)?;

    Ok(Json(dto::TodoList::from(created)))
}

#[utoipa::path(
    delete,
    path = "/lists/{list_id}/delete",
    tag = LIST_API_GROUP,
    params(("list_id" = i32, Path, description = "ID of the list to delete")),
    responses(
        (status = 200, description = "List and all of its todos deleted", body = dto::Success),
        (status = 404, description = "The list does not exist", body = BasicErrorResponse),
        (status = 500, description = "Could not delete the list", body = BasicErrorResponse),
    ),
)]
/// Deletes a list along with all of its todos
async fn delete_list(
    list_id: i32,
    ext_cxn: &mut impl TransactableExternalConnectivity,
    list_service: &impl domain::todo_list::driving_ports::ListPort,
) -> Result<Json<dto::Success>, ErrorResponse> {
    info!("Deleting todo list {list_id}");
    let list_detect = persistence::db_list_driven_ports::DbDetectList;
    let list_write = persistence::db_list_driven_ports::DbListWriter;
    let todo_write = persistence::db_todo_driven_ports::DbTodoWriter;

    list_service
        .delete_list(
            list_id,
            &mut *ext_cxn,
            &list_detect,
            &list_write,
            &todo_write,
        )
        .await
        .map_err(DomainErrorResponse::from)?;

    Ok(Json(dto::Success::new()))
}

#[utoipa::path(
    post,
    path = "/lists/{list_id}/set-completed",
    tag = LIST_API_GROUP,
    params(("list_id" = i32, Path, description = "ID of the list to complete")),
    responses(
        (status = 200, description = "Every todo in the list is now complete"),
        (status = 404, description = "The list does not exist", body = BasicErrorResponse),
        (status = 500, description = "Could not update the list", body = BasicErrorResponse),
    ),
)]
/// Marks every todo in a list as complete
async fn complete_list(
    list_id: i32,
    ext_cxn: &mut impl TransactableExternalConnectivity,
    list_service: &impl domain::todo_list::driving_ports::ListPort,
) -> Result<StatusCode, ErrorResponse> {
    info!("Completing todo list {list_id}");
    let list_detect = persistence::db_list_driven_ports::DbDetectList;
    let todo_write = persistence::db_todo_driven_ports::DbTodoWriter;

    list_service
        .complete_list(list_id, &mut *ext_cxn, &list_detect, &todo_write)
        .await
        .map_err(DomainErrorResponse::from)?;

    Ok(StatusCode::OK)
}
