pub mod json_backend;
pub mod routine_file;
