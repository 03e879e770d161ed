use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

pub mod todo;
pub mod todo_list;

pub use todo::*;
pub use todo_list::*;

/// Collects the schemas of every DTO so they can be merged into the OpenAPI document
#[derive(OpenApi)]
#[openapi(components(schemas(
    NewTodo,
    TodoItem,
    SetComplete,
    SetCompleted,
    NewList,
    TodoList,
    ListPage,
    Success,
    crate::routing_utils::BasicErrorResponse,
    crate::routing_utils::ExtraInfo,
    crate::routing_utils::ValidationErrorSchema,
)))]
pub struct OpenApiSchemas;

/// Acknowledges that a deletion went through
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize, Debug, PartialEq, Eq))]
pub struct Success {
    #[schema(example = true)]
    pub success: bool,
}

impl Success {
    pub fn new() -> Self {
        Success { success: true }
    }
}
