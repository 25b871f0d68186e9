//! Per-job resource gauges.
//!
//! Gauges are plain snapshots copied out of the host once per query. Only the
//! fields rule sets actually read are modelled.

use crate::ids::Job;

/// Structured per-job resource snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JobGauge {
    Bard(BardGauge),
    DarkKnight(DarkKnightGauge),
    Scholar(ScholarGauge),
}

impl JobGauge {
    /// Returns the job this gauge belongs to.
    pub const fn job(&self) -> Job {
        match self {
            Self::Bard(_) => Job::Bard,
            Self::DarkKnight(_) => Job::DarkKnight,
            Self::Scholar(_) => Job::Scholar,
        }
    }

    pub const fn as_bard(&self) -> Option<BardGauge> {
        match self {
            Self::Bard(g) => Some(*g),
            _ => None,
        }
    }

    pub const fn as_dark_knight(&self) -> Option<DarkKnightGauge> {
        match self {
            Self::DarkKnight(g) => Some(*g),
            _ => None,
        }
    }

    pub const fn as_scholar(&self) -> Option<ScholarGauge> {
        match self {
            Self::Scholar(g) => Some(*g),
            _ => None,
        }
    }
}

/// Song currently being performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Song {
    #[default]
    None,
    Wanderer,
    Mage,
    Army,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BardGauge {
    pub song: Song,
    /// Remaining song time in milliseconds.
    pub song_timer_ms: u32,
    /// Repertoire stacks (Pitch Perfect / Army's Muse).
    pub repertoire: u8,
    /// Soul Voice, 0..=100.
    pub soul_voice: u8,
}

impl BardGauge {
    pub fn song_timer_secs(&self) -> f32 {
        self.song_timer_ms as f32 / 1000.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DarkKnightGauge {
    /// Blood gauge, 0..=100.
    pub blood: u8,
    /// Remaining Darkside in milliseconds.
    pub darkside_timer_ms: u32,
    /// Remaining Living Shadow in milliseconds.
    pub shadow_timer_ms: u32,
    /// Whether a free Edge of Shadow is available (popped Blackest Night).
    pub dark_arts: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScholarGauge {
    /// Aetherflow stacks, 0..=3.
    pub aetherflow: u8,
    /// Fairy gauge, 0..=100.
    pub fairy_gauge: u8,
    /// Remaining Seraph time in milliseconds.
    pub seraph_timer_ms: u32,
}

impl ScholarGauge {
    pub const fn has_aetherflow(&self) -> bool {
        self.aetherflow > 0
    }
}
