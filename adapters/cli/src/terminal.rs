//! Plain-text display that writes each day to any [`Write`] target.

use std::{io::Write, thread, time::Duration};

use alien_invasion_rendering::{battle_log, weapon_for, DisplaySink, Frame, WorldMap};
use anyhow::{Context, Result as AnyResult};

/// Writes the status line, battle narration, and city list for every day.
#[derive(Debug)]
pub(crate) struct TerminalSink<W> {
    out: W,
    delay: Duration,
}

impl<W: Write> TerminalSink<W> {
    /// Creates a sink that pauses for `delay` after each day.
    pub(crate) fn new(out: W, delay: Duration) -> Self {
        Self { out, delay }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn present(&mut self, frame: &Frame<'_>) -> AnyResult<()> {
        writeln!(self.out, "{}", frame.world.status_line(frame.tick))?;
        for (index, battle) in frame.battles.iter().enumerate() {
            writeln!(
                self.out,
                "  {}",
                battle_log(battle, weapon_for(frame.tick, index))
            )?;
        }
        for city in frame.world.cities() {
            writeln!(self.out, "    {city}")?;
        }
        self.out.flush().context("failed to flush display output")?;

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }

    fn finish(&mut self, world: &WorldMap) -> AnyResult<()> {
        writeln!(
            self.out,
            "invasion over: {} aliens alive, {} dead, {} of {} cities destroyed",
            world.alive(),
            world.dead(),
            world.destroyed(),
            world.cities().len()
        )?;
        self.out.flush().context("failed to flush display output")
    }
}
