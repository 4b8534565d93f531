//! Project completion derived from the phase and status of its songs.

use std::str::FromStr;

use db::{models::song::Song, types::SongPhase};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

const COMPLETED: &str = "completed";

/// Phase and status of a song exactly as persisted.
///
/// Kept as raw strings so that progress stays defined for values outside the
/// known enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSnapshot {
    pub phase: String,
    pub status: String,
}

impl SongSnapshot {
    pub fn new(phase: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            status: status.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == COMPLETED
    }
}

impl From<&Song> for SongSnapshot {
    fn from(song: &Song) -> Self {
        Self::new(song.phase.to_string(), song.status.to_string())
    }
}

impl From<(String, String)> for SongSnapshot {
    fn from((phase, status): (String, String)) -> Self {
        Self { phase, status }
    }
}

/// Completion of a single song in percent.
///
/// A completed song counts 100 whatever its phase; otherwise each phase is
/// worth 25 points below its number. Unknown phases count 0.
pub fn song_progress(song: &SongSnapshot) -> f64 {
    if song.is_completed() {
        return 100.0;
    }
    match SongPhase::from_str(&song.phase) {
        Ok(SongPhase::Preproduction) => 0.0,
        Ok(SongPhase::Production) => 25.0,
        Ok(SongPhase::Engineering) => 50.0,
        Ok(SongPhase::Publishing) => 75.0,
        Err(_) => 0.0,
    }
}

/// Arithmetic mean of [`song_progress`] over all songs, 0 for an empty project.
pub fn project_progress(songs: &[SongSnapshot]) -> f64 {
    if songs.is_empty() {
        return 0.0;
    }
    let total: f64 = songs.iter().map(song_progress).sum();
    total / songs.len() as f64
}

/// Number of songs sitting in each phase, with completed songs counted apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct PhaseBreakdown {
    pub preproduction: usize,
    pub production: usize,
    pub engineering: usize,
    pub publishing: usize,
    pub completed: usize,
    /// Pending songs whose stored phase is not one of the four phases.
    pub unknown: usize,
}

impl PhaseBreakdown {
    pub fn total(&self) -> usize {
        self.preproduction
            + self.production
            + self.engineering
            + self.publishing
            + self.completed
            + self.unknown
    }
}

pub fn phase_breakdown(songs: &[SongSnapshot]) -> PhaseBreakdown {
    let mut breakdown = PhaseBreakdown::default();
    for song in songs {
        if song.is_completed() {
            breakdown.completed += 1;
            continue;
        }
        match SongPhase::from_str(&song.phase) {
            Ok(SongPhase::Preproduction) => breakdown.preproduction += 1,
            Ok(SongPhase::Production) => breakdown.production += 1,
            Ok(SongPhase::Engineering) => breakdown.engineering += 1,
            Ok(SongPhase::Publishing) => breakdown.publishing += 1,
            Err(_) => breakdown.unknown += 1,
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(phase: &str) -> SongSnapshot {
        SongSnapshot::new(phase, "pending")
    }

    fn completed(phase: &str) -> SongSnapshot {
        SongSnapshot::new(phase, "completed")
    }

    #[test]
    fn pending_songs_score_by_phase() {
        assert_eq!(song_progress(&pending("1")), 0.0);
        assert_eq!(song_progress(&pending("2")), 25.0);
        assert_eq!(song_progress(&pending("3")), 50.0);
        assert_eq!(song_progress(&pending("4")), 75.0);
    }

    #[test]
    fn completed_status_overrides_any_phase() {
        for phase in ["1", "2", "3", "4", "unknown", ""] {
            assert_eq!(song_progress(&completed(phase)), 100.0);
        }
    }

    #[test]
    fn unknown_phase_scores_zero() {
        assert_eq!(song_progress(&pending("unknown")), 0.0);
        assert_eq!(song_progress(&pending("")), 0.0);
        assert_eq!(song_progress(&pending("5")), 0.0);
        assert_eq!(song_progress(&SongSnapshot::new("2", "archived")), 25.0);
    }

    #[test]
    fn empty_project_has_zero_progress() {
        assert_eq!(project_progress(&[]), 0.0);
    }

    #[test]
    fn project_progress_is_the_mean() {
        assert_eq!(project_progress(&[pending("2"), pending("4")]), 50.0);
        assert_eq!(
            project_progress(&[pending("1"), pending("2"), pending("2")]),
            50.0 / 3.0
        );
    }

    #[test]
    fn project_progress_ignores_order_and_is_idempotent() {
        let songs = vec![pending("3"), completed("1"), pending("bogus"), pending("4")];
        let mut reversed = songs.clone();
        reversed.reverse();

        let first = project_progress(&songs);
        assert_eq!(first, project_progress(&songs));
        assert_eq!(first, project_progress(&reversed));
        assert_eq!(first, (50.0 + 100.0 + 0.0 + 75.0) / 4.0);
    }

    #[test]
    fn project_progress_stays_within_bounds() {
        let phases = ["1", "2", "3", "4", "x"];
        let statuses = ["pending", "completed"];
        let all: Vec<SongSnapshot> = phases
            .iter()
            .flat_map(|phase| statuses.iter().map(move |status| SongSnapshot::new(*phase, *status)))
            .collect();

        for len in 0..=all.len() {
            for start in 0..all.len() {
                let songs: Vec<_> = all.iter().cycle().skip(start).take(len).cloned().collect();
                let progress = project_progress(&songs);
                assert!((0.0..=100.0).contains(&progress), "{progress} out of range");
            }
        }
    }

    #[test]
    fn full_progress_implies_every_song_completed() {
        assert_eq!(project_progress(&[completed("4"), completed("2")]), 100.0);
        assert!(project_progress(&[completed("4"), pending("4")]) < 100.0);
        assert!(project_progress(&vec![pending("4"); 8]) < 100.0);
    }

    #[test]
    fn breakdown_counts_pending_by_phase() {
        let breakdown = phase_breakdown(&[
            pending("1"),
            pending("1"),
            pending("3"),
            completed("4"),
            pending("9"),
        ]);
        assert_eq!(breakdown.preproduction, 2);
        assert_eq!(breakdown.engineering, 1);
        assert_eq!(breakdown.publishing, 0);
        assert_eq!(breakdown.completed, 1);
        assert_eq!(breakdown.unknown, 1);
        assert_eq!(breakdown.total(), 5);
    }
}
