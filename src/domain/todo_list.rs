use crate::domain::Error;
use crate::domain::todo::Todo;
use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo_list::driven_ports::{DetectList, ListReader, ListWriter};
use crate::external_connections::{
    ExternalConnectivity, Transactable, TransactableExternalConnectivity, TransactionHandle,
};
use anyhow::Context;
use tracing::{info, warn};

/// A named collection of todos
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct TodoList {
    pub id: i32,
    pub name: String,
}

#[derive(Debug)]
#[cfg_attr(test, derive(Clone, PartialEq, Eq))]
pub struct NewList {
    pub name: String,
}

/// Everything needed to render the page for one list: the navigation across all lists,
/// the selected list (if the ID resolved to one) and the selected list's todos
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct ListPage {
    pub lists: Vec<TodoList>,
    pub active_list: Option<TodoList>,
    pub todos: Vec<Todo>,
}

pub mod driven_ports {
    use super::*;

    pub trait ListReader {
        /// Fetches every list, ordered by ID
        async fn all_lists(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TodoList>, anyhow::Error>;
        async fn list_by_id(
            &self,
            list_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<TodoList>, anyhow::Error>;
    }

    pub trait DetectList {
        async fn list_exists(
            &self,
            list_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<bool, anyhow::Error>;
    }

    pub trait ListWriter {
        async fn create_list(
            &self,
            new_list: &NewList,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<TodoList, anyhow::Error>;
        /// Removes the list record only. Callers are responsible for removing the list's todos first.
        async fn delete_list(
            &self,
            list_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

/// Fails with [Error::ListDoesNotExist] if no list has the given ID
pub async fn verify_list_exists(
    list_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    list_detect: &impl DetectList,
) -> Result<(), Error> {
    let list_exists = list_detect
        .list_exists(list_id, ext_cxn)
        .await
        .context("checking that a todo list exists")?;

    if !list_exists {
        warn!("Todo list {list_id} does not exist");
        return Err(Error::ListDoesNotExist(list_id));
    }

    Ok(())
}

pub mod driving_ports {
    use super::*;

    pub trait ListPort {
        async fn create_list(
            &self,
            new_list: &NewList,
            ext_cxn: &mut impl TransactableExternalConnectivity,
            list_write: &impl ListWriter,
        ) -> Result<TodoList, Error>;
        /// Deletes a list along with every todo it owns
        async fn delete_list(
            &self,
            list_id: i32,
            ext_cxn: &mut impl TransactableExternalConnectivity,
            list_detect: &impl DetectList,
            list_write: &impl ListWriter,
            todo_write: &impl TodoWriter,
        ) -> Result<(), Error>;
        /// Marks every todo in a list as complete
        async fn complete_list(
            &self,
            list_id: i32,
            ext_cxn: &mut impl TransactableExternalConnectivity,
            list_detect: &impl DetectList,
            todo_write: &impl TodoWriter,
        ) -> Result<(), Error>;
        async fn list_page(
            &self,
            list_id: i32,
            ext_cxn: &mut impl TransactableExternalConnectivity,
            list_read: &impl ListReader,
            todo_read: &impl TodoReader,
        ) -> Result<ListPage, Error>;
    }
}

pub struct ListService {}

impl driving_ports::ListPort for ListService {
    async fn create_list(
        &self,
        new_list: &NewList,
        ext_cxn: &mut impl TransactableExternalConnectivity,
        list_write: &impl ListWriter,
    ) -> Result<TodoList, Error> {
        let mut txn = ext_cxn.start_transaction().await?;

        let created = list_write
            .create_list(new_list, &mut txn)
            .await
            .context("creating a todo list")?;

        txn.commit().await?;
        info!(list_id = created.id, "Created todo list");
        Ok(created)
    }

    async fn delete_list(
        &self,
        list_id: i32,
        ext_cxn: &mut impl TransactableExternalConnectivity,
        list_detect: &impl DetectList,
        list_write: &impl ListWriter,
        todo_write: &impl TodoWriter,
    ) -> Result<(), Error> {
        let mut txn = ext_cxn.start_transaction().await?;

        verify_list_exists(list_id, &mut txn, list_detect).await?;
        todo_write
            .delete_todos_for_list(list_id, &mut txn)
            .await
            .context("deleting the todos of a list")?;
        list_write
            .delete_list(list_id, &mut txn)
            .await
            .context("deleting a todo list")?;

        txn.commit().await?;
        Ok(())
    }

    async fn complete_list(
        &self,
        list_id: i32,
        ext_cxn: &mut impl TransactableExternalConnectivity,
        list_detect: &impl DetectList,
        todo_write: &impl TodoWriter,
    ) -> Result<(), Error> {
        let mut txn = ext_cxn.start_transaction().await?;

        verify_list_exists(list_id, &mut txn, list_detect).await?;
        todo_write
            .complete_todos_for_list(list_id, &mut txn)
            .await
            .context("completing the todos of a list")?;

        txn.commit().await?;
        Ok(())
    }

    async fn list_page(
        &self,
        list_id: i32,
        ext_cxn: &mut impl TransactableExternalConnectivity,
        list_read: &impl ListReader,
        todo_read: &impl TodoReader,
    ) -> Result<ListPage, Error> {
        let lists = list_read
            .all_lists(&mut *ext_cxn)
            .await
            .context("fetching all todo lists")?;
        let active_list = list_read
            .list_by_id(list_id, &mut *ext_cxn)
            .await
            .context("fetching the active todo list")?;
        let todos = todo_read
            .todos_for_list(list_id, &mut *ext_cxn)
            .await
            .context("fetching the todos of the active list")?;

        Ok(ListPage {
            lists,
            active_list,
            todos,
        })
    }
}
