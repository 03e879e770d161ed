use crate::domain;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// DTO for creating a new todo via the API
#[derive(Deserialize, Display, Validate, ToSchema)]
#[display("\"{description}\" in list {list_id}")]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTodo {
    #[validate(length(min = 1))]
    #[schema(example = "Write spec")]
    pub description: String,
    #[schema(example = 1)]
    pub list_id: i32,
}

impl From<NewTodo> for domain::todo::NewTodo {
    fn from(value: NewTodo) -> Self {
        domain::todo::NewTodo {
            list_id: value.list_id,
            description: value.description,
        }
    }
}

/// DTO for a todo returned by the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct TodoItem {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = false)]
    pub complete: bool,
    #[schema(example = "Write spec")]
    pub description: String,
}

impl From<domain::todo::Todo> for TodoItem {
    fn from(value: domain::todo::Todo) -> Self {
        TodoItem {
            id: value.id,
            complete: value.complete,
            description: value.description,
        }
    }
}

/// DTO for the form-driven completion toggle, which redirects back to the index
#[derive(Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct SetComplete {
    #[schema(example = true)]
    pub complete: bool,
}

/// DTO for the script-driven completion toggle, which answers with an empty body
#[derive(Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct SetCompleted {
    #[schema(example = true)]
    pub completed: bool,
}
