use std::io::{Stderr, Write, stderr};

use super::{AudioError, AudioSink, Cue};

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell: once for ordinary cues, twice for the loud ones
pub struct TerminalBell<W: Write = Stderr> {
    out: W,
}

impl TerminalBell {
    pub fn new() -> Self {
        Self::with_writer(stderr())
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    fn rings(cue: Cue) -> usize {
        match cue {
            Cue::Start | Cue::GrowMinor => 1,
            Cue::GrowMajor | Cue::Loss => 2,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        for _ in 0..Self::rings(cue) {
            self.out.write_all(BEL)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
