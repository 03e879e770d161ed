pub mod swagger_main;
pub mod todo;
pub mod todo_list;

#[cfg(test)]
pub mod test_util;
