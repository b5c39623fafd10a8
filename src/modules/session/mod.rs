pub mod clock;
pub mod cue_trigger;
pub mod phase_progress;
pub mod scheduler;
pub mod sequencer;
