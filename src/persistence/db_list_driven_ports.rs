use super::Count;
use crate::domain;
use crate::domain::todo_list::{NewList, TodoList};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{FromRow, query, query_as};

#[derive(FromRow)]
struct TodoListRow {
    id: i32,
    name: String,
}

impl From<TodoListRow> for TodoList {
    fn from(value: TodoListRow) -> Self {
        TodoList {
            id: value.id,
            name: value.name,
        }
    }
}

pub struct DbListReader;

impl domain::todo_list::driven_ports::ListReader for DbListReader {
    async fn all_lists(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<TodoList>, Error> {
        let mut connection = ext_cxn.database_cxn().await?;

        let lists: Vec<TodoList> =
            query_as::<_, TodoListRow>("SELECT tl.id, tl.name FROM todolists tl ORDER BY tl.id")
                .fetch_all(connection.borrow_connection())
                .await
                .context("Fetching all todo lists")?
                .into_iter()
                .map(TodoList::from)
                .collect();

        Ok(lists)
    }

    async fn list_by_id(
        &self,
        list_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<TodoList>, Error> {
        let mut connection = ext_cxn.database_cxn().await?;

        let list = query_as::<_, TodoListRow>(
            "SELECT tl.id, tl.name FROM todolists tl WHERE tl.id = $1",
        )
        .bind(list_id)
        .fetch_optional(connection.borrow_connection())
        .await
        .context("Fetching a todo list by id")?;

        Ok(list.map(TodoList::from))
    }
}

pub struct DbDetectList;

impl domain::todo_list::driven_ports::DetectList for DbDetectList {
    async fn list_exists(
        &self,
        list_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<bool, Error> {
        let mut connection = ext_cxn.database_cxn().await?;

        let list_with_id_count =
            query_as::<_, Count>("SELECT count(*) FROM todolists tl WHERE tl.id = $1")
                .bind(list_id)
                .fetch_one(connection.borrow_connection())
                .await
                .context("Detecting todo list with ID")?;

        Ok(list_with_id_count.count() > 0)
    }
}

pub struct DbListWriter;

impl domain::todo_list::driven_ports::ListWriter for DbListWriter {
    async fn create_list(
        &self,
        new_list: &NewList,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<TodoList, Error> {
        let mut connection = ext_cxn.database_cxn().await?;

        let created = query_as::<_, TodoListRow>(
            "INSERT INTO todolists(name) VALUES ($1) RETURNING id, name",
        )
        .bind(&new_list.name)
        .fetch_one(connection.borrow_connection())
        .await
        .context("Inserting a new todo list")?;

        Ok(created.into())
    }

    async fn delete_list(
        &self,
        list_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut connection = ext_cxn.database_cxn().await?;

        query("DELETE FROM todolists WHERE id = $1")
            .bind(list_id)
            .execute(connection.borrow_connection())
            .await
            .context("Deleting a todo list")?;

        Ok(())
    }
}
