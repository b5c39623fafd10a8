pub mod routine_library;
