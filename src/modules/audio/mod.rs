pub mod cue_backend;
