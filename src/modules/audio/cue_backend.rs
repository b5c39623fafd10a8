use crate::application::state::ConfigState;
use crate::core::traits::CueSink;
use crate::utils::volume_percent_to_amplitude;
use anyhow::Result;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};
use std::io::{Write, stdout};
use std::time::Duration;

const BEEP_FREQUENCY_HZ: f32 = 880.0;
const BEEP_LENGTH: Duration = Duration::from_millis(180);

/// Plays a short sine beep on the default output device.
pub struct RodioCueBackend {
    // Dropping the stream silences the sink, so it lives as long as the backend.
    _stream: OutputStream,
    sink: Sink,
    amplitude: f32,
}

impl RodioCueBackend {
    pub fn new(volume_percent: u8) -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;

        Ok(Self {
            _stream: stream,
            sink,
            amplitude: volume_percent_to_amplitude(volume_percent),
        })
    }
}

impl CueSink for RodioCueBackend {
    fn cue(&mut self) {
        let beep = SineWave::new(BEEP_FREQUENCY_HZ)
            .take_duration(BEEP_LENGTH)
            .amplify(self.amplitude);
        self.sink.append(beep);
        self.sink.play();
    }
}

// To avoid a beep outliving the session
impl Drop for RodioCueBackend {
    fn drop(&mut self) {
        self.sink.stop();
    }
}

/// Fallback when no audio device is available: rings the terminal bell.
pub struct TerminalBellCue;

impl CueSink for TerminalBellCue {
    fn cue(&mut self) {
        let mut out = stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Used when cues are switched off.
pub struct SilentCue;

impl CueSink for SilentCue {
    fn cue(&mut self) {}
}

/// Pick the cue backend for the current settings.
pub fn cue_backend_for(config: &ConfigState) -> Box<dyn CueSink> {
    if !config.cue_enabled || config.cue_window_secs == 0 {
        return Box::new(SilentCue);
    }

    match RodioCueBackend::new(config.cue_volume) {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            eprintln!("Warning: audio output unavailable ({}), using terminal bell", e);
            Box::new(TerminalBellCue)
        }
    }
}
