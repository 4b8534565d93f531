//! Song phase transitions.
//!
//! A song moves forward one phase at a time. Advancing from the last phase
//! does not wrap around: it asks for completion, which is terminal.

use db::types::{SongPhase, SongStatus};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Song is already completed")]
    SongCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "phase", rename_all = "snake_case")]
pub enum PhaseAdvance {
    Next(SongPhase),
    CompletionRequested,
}

fn ensure_open(status: SongStatus) -> Result<(), TransitionError> {
    match status {
        SongStatus::Completed => Err(TransitionError::SongCompleted),
        SongStatus::Pending => Ok(()),
    }
}

pub fn advance_phase(phase: SongPhase, status: SongStatus) -> Result<PhaseAdvance, TransitionError> {
    ensure_open(status)?;
    if phase.is_last() {
        return Ok(PhaseAdvance::CompletionRequested);
    }
    Ok(PhaseAdvance::Next(phase.wrapping_next()))
}

/// Completion is allowed from any phase, once.
pub fn complete_song(status: SongStatus) -> Result<SongStatus, TransitionError> {
    ensure_open(status)?;
    Ok(SongStatus::Completed)
}

/// Direct phase edit; any target phase is accepted while the song is open.
pub fn set_phase(status: SongStatus, phase: SongPhase) -> Result<SongPhase, TransitionError> {
    ensure_open(status)?;
    Ok(phase)
}
