use crate::domain;
use crate::domain::todo::{NewTodo, Todo};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{FromRow, query, query_as};

pub struct DbTodoReader;

#[derive(FromRow)]
struct TodoRow {
    id: i32,
    description: String,
    complete: bool,
    list_id: i32,
}

impl From<TodoRow> for domain::todo::Todo {
    fn from(value: TodoRow) -> Self {
        Todo {
            id: value.id,
            list_id: value.list_id,
            description: value.description,
            complete: value.complete,
        }
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn todos_for_list(
        &self,
        list_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todos: Vec<Todo> = query_as::<_, TodoRow>(
            "SELECT t.id, t.description, t.complete, t.list_id FROM todos t WHERE t.list_id = $1 ORDER BY t.id",
        )
        .bind(list_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch the todos of a list")?
        .into_iter()
        .map(domain::todo::Todo::from)
        .collect();

        Ok(todos)
    }

    async fn todo_by_id(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todo = query_as::<_, TodoRow>(
            "SELECT t.id, t.description, t.complete, t.list_id FROM todos t WHERE t.id = $1",
        )
        .bind(todo_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a todo by ID")?
        .map(domain::todo::Todo::from);

        Ok(todo)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Todo, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let created = query_as::<_, TodoRow>(
            "INSERT INTO todos(description, complete, list_id) VALUES ($1, FALSE, $2) \
             RETURNING id, description, complete, list_id",
        )
        .bind(&new_todo.description)
        .bind(new_todo.list_id)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo into the database")?;

        Ok(created.into())
    }

    async fn set_complete(
        &self,
        todo_id: i32,
        complete: bool,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("UPDATE todos SET complete = $1 WHERE id = $2")
            .bind(complete)
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to update a todo's completion state")?;

        Ok(())
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("DELETE FROM todos WHERE id = $1")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo from the database")?;

        Ok(())
    }

    async fn delete_todos_for_list(
        &self,
        list_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("DELETE FROM todos WHERE list_id = $1")
            .bind(list_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove the todos of a list")?;

        Ok(())
    }

    async fn complete_todos_for_list(
        &self,
        list_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("UPDATE todos SET complete = TRUE WHERE list_id = $1")
            .bind(list_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to complete the todos of a list")?;

        Ok(())
    }
}
