pub mod field;
pub mod forms;
pub mod log;
pub mod row;
