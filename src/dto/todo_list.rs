use crate::domain;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::TodoItem;

/// DTO for creating a new todo list via the API
#[derive(Deserialize, Display, Validate, ToSchema)]
#[display("{name}")]
#[cfg_attr(test, derive(Serialize))]
pub struct NewList {
    #[validate(length(min = 1))]
    #[schema(example = "Groceries")]
    pub name: String,
}

impl From<NewList> for domain::todo_list::NewList {
    fn from(value: NewList) -> Self {
        domain::todo_list::NewList { name: value.name }
    }
}

/// DTO for a todo list returned by the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct TodoList {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Groceries")]
    pub name: String,
}

impl From<domain::todo_list::TodoList> for TodoList {
    fn from(value: domain::todo_list::TodoList) -> Self {
        TodoList {
            id: value.id,
            name: value.name,
        }
    }
}

/// DTO carrying the data shown on a list's page
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct ListPage {
    pub lists: Vec<TodoList>,
    pub active_list: Option<TodoList>,
    pub todos: Vec<TodoItem>,
}

impl From<domain::todo_list::ListPage> for ListPage {
    fn from(value: domain::todo_list::ListPage) -> Self {
        ListPage {
            lists: value.lists.into_iter().map(TodoList::from).collect(),
            active_list: value.active_list.map(TodoList::from),
            todos: value.todos.into_iter().map(TodoItem::from).collect(),
        }
    }
}
