//! Fire-and-forget sound cues.
//!
//! Playback failures never reach the game: drivers go through [`play_or_log`],
//! which reports them to the log and carries on.

pub mod bell;

use log::warn;
use std::fmt;

pub use crate::game::Cue;
pub use bell::TerminalBell;

#[derive(Debug)]
pub enum AudioError {
    /// The output device could not be written to
    Io(std::io::Error),
    Unavailable(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Io(err) => write!(f, "audio output failed: {err}"),
            AudioError::Unavailable(reason) => write!(f, "audio unavailable: {reason}"),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::Io(err) => Some(err),
            AudioError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for AudioError {
    fn from(err: std::io::Error) -> Self {
        AudioError::Io(err)
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Play a cue, logging instead of returning any failure
pub fn play_or_log(sink: &mut dyn AudioSink, cue: Cue) {
    if let Err(err) = sink.play(cue) {
        warn!("could not play {cue:?} cue: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl AudioSink for Broken {
        fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
            Err(AudioError::Unavailable("no device".to_string()))
        }
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut sink = Broken;
        play_or_log(&mut sink, Cue::Loss);
    }

    #[test]
    fn test_error_display() {
        let err = AudioError::Unavailable("no device".to_string());
        assert_eq!(err.to_string(), "audio unavailable: no device");

        let io = AudioError::from(std::io::Error::other("pipe closed"));
        assert!(io.to_string().contains("pipe closed"));
        assert!(std::error::Error::source(&io).is_some());
    }
}
