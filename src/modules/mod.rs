pub mod audio;
pub mod library;
pub mod session;
pub mod storage;
pub mod ui;
