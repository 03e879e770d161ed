use crate::domain;
use crate::domain::Error;
use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo_list::driven_ports::DetectList;
use crate::external_connections::{
    Transactable, TransactableExternalConnectivity, TransactionHandle,
};
use anyhow::Context;
use tracing::info;

/// A single task owned by a todo list
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct Todo {
    pub id: i32,
    pub list_id: i32,
    pub description: String,
    pub complete: bool,
}

/// A task that has not been stored yet. New todos always start out incomplete.
#[derive(Debug)]
#[cfg_attr(test, derive(Clone, PartialEq, Eq))]
pub struct NewTodo {
    pub list_id: i32,
    pub description: String,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait TodoReader {
        /// Fetches every todo in a list, ordered by ID
        async fn todos_for_list(
            &self,
            list_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, anyhow::Error>;
        async fn todo_by_id(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Todo>, anyhow::Error>;
    }

    pub trait TodoWriter {
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Todo, anyhow::Error>;
        async fn set_complete(
            &self,
            todo_id: i32,
            complete: bool,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
        async fn delete_todos_for_list(
            &self,
            list_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
        async fn complete_todos_for_list(
            &self,
            list_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;

    pub trait TodoPort {
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl TransactableExternalConnectivity,
            list_detect: &impl DetectList,
            todo_write: &impl TodoWriter,
        ) -> Result<Todo, Error>;
        async fn set_todo_complete(
            &self,
            todo_id: i32,
            complete: bool,
            ext_cxn: &mut impl TransactableExternalConnectivity,
            todo_read: &impl TodoReader,
            todo_write: &impl TodoWriter,
        ) -> Result<(), Error>;
        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl TransactableExternalConnectivity,
            todo_read: &impl TodoReader,
            todo_write: &impl TodoWriter,
        ) -> Result<(), Error>;
    }
}

/// Looks up a todo inside the caller's connection, turning a missing record into [Error::TodoDoesNotExist]
async fn verify_todo_exists(
    todo_id: i32,
    ext_cxn: &mut impl crate::external_connections::ExternalConnectivity,
    todo_read: &impl TodoReader,
) -> Result<Todo, Error> {
    todo_read
        .todo_by_id(todo_id, ext_cxn)
        .await
        .context("looking up a todo")?
        .ok_or(Error::TodoDoesNotExist(todo_id))
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl TransactableExternalConnectivity,
        list_detect: &impl DetectList,
        todo_write: &impl TodoWriter,
    ) -> Result<Todo, Error> {
        let mut txn = ext_cxn.start_transaction().await?;

        domain::todo_list::verify_list_exists(new_todo.list_id, &mut txn, list_detect).await?;
        let created = todo_write
            .create_todo(new_todo, &mut txn)
            .await
            .context("creating a todo")?;

        txn.commit().await?;
        info!(todo_id = created.id, list_id = created.list_id, "Created todo");
        Ok(created)
    }

    async fn set_todo_complete(
        &self,
        todo_id: i32,
        complete: bool,
        ext_cxn: &mut impl TransactableExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<(), Error> {
        let mut txn = ext_cxn.start_transaction().await?;

        verify_todo_exists(todo_id, &mut txn, todo_read).await?;
        todo_write
            .set_complete(todo_id, complete, &mut txn)
            .await
            .context("updating a todo's completion state")?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl TransactableExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<(), Error> {
        let mut txn = ext_cxn.start_transaction().await?;

        verify_todo_exists(todo_id, &mut txn, todo_read).await?;
        todo_write
            .delete_todo(todo_id, &mut txn)
            .await
            .context("deleting a todo")?;

        txn.commit().await?;
        Ok(())
    }
}
