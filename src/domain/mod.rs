use thiserror::Error;

pub mod todo;
pub mod todo_list;

#[cfg(test)]
pub mod test_util;

/// Failures surfaced by the domain's driving ports
#[derive(Error, Debug)]
pub enum Error {
    #[error("todo list {0} does not exist")]
    ListDoesNotExist(i32),
    #[error("todo {0} does not exist")]
    TodoDoesNotExist(i32),
    #[error(transparent)]
    PortError(#[from] anyhow::Error),
}
