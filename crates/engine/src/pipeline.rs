//! Placement pipeline.
//!
//! Records are read lazily, so a bad line is only reported once every
//! earlier placement has been resolved. The first error of any kind stops
//! the run; in non-debug mode nothing has been written by then.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::core::resolve::{BoardStats, Resolution};
use crate::core::Board;
use crate::input::{Placement, PlacementReader};
use crate::output::{write_board, write_dump};

/// What a completed run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub stats: BoardStats,
    /// Records written in the final listing (0 in debug mode)
    pub records: usize,
    /// Columns still materialized at the end
    pub columns: usize,
}

/// A board plus the configuration it is driven with
pub struct Engine {
    config: EngineConfig,
    board: Board,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            board: Board::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Place and fully resolve one piece
    pub fn place(&mut self, placement: Placement) -> Result<Resolution> {
        let Placement { piece, x } = placement;
        if x.unsigned_abs() > self.config.max_abs_x.unsigned_abs() {
            anyhow::bail!("x = {} exceeds the configured bound {}", x, self.config.max_abs_x);
        }
        let resolution = self
            .board
            .place_piece(x, piece)
            .with_context(|| format!("placing color {} at x = {}", piece.color(), x))?;
        debug!(
            x,
            color = piece.color(),
            row = resolution.row,
            removed = resolution.removed,
            passes = resolution.scan_passes,
            "placed"
        );
        Ok(resolution)
    }

    /// Consume every record of `input`, dumping after each one in debug mode
    pub fn feed<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<u64> {
        let mut placed = 0;
        for placement in PlacementReader::with_bound(input, self.config.max_abs_x) {
            let placement = placement.context("invalid input")?;
            self.place(placement)?;
            placed += 1;
            if self.config.debug {
                write_dump(out, &self.board).context("writing debug dump")?;
            }
        }
        Ok(placed)
    }

    /// Write the final record listing (skipped in debug mode)
    pub fn finish<W: Write>(self, out: &mut W) -> Result<RunSummary> {
        let records = if self.config.debug {
            0
        } else {
            write_board(out, self.config.format, &self.board).context("writing records")?
        };
        Ok(RunSummary {
            stats: self.board.stats(),
            records,
            columns: self.board.column_count(),
        })
    }
}

/// Read placements from `input`, resolve them and write the result to `out`
pub fn run<R: BufRead, W: Write>(config: &EngineConfig, input: R, out: &mut W) -> Result<RunSummary> {
    let mut engine = Engine::new(*config);
    engine.feed(input, out)?;
    let summary = engine.finish(out)?;
    info!(
        placements = summary.stats.placements,
        removed = summary.stats.pieces_removed,
        cascades = summary.stats.cascades,
        records = summary.records,
        columns = summary.columns,
        "run complete"
    );
    Ok(summary)
}
