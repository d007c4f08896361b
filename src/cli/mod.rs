pub mod auth_cmd;
pub mod module_cmd;
pub mod output;
pub mod search_cmd;
