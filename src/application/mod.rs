pub mod app;
pub mod orchestrator;
pub mod state;
