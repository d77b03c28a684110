//! HUD view-model
//!
//! Tracks the presented score, combo, and the best score seen this process
//! lifetime. The high score deliberately does not survive a restart - there
//! is no leaderboard file.

use serde::Serialize;

use crate::sim::GameState;

/// Which HUD fields changed in the last `observe` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudChanges {
    pub score: bool,
    pub high_score: bool,
    pub combo: bool,
}

impl HudChanges {
    pub fn any(&self) -> bool {
        self.score || self.high_score || self.combo
    }
}

/// Score/high-score/combo values as shown to the player
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HudModel {
    pub score: u64,
    pub high_score: u64,
    pub combo: u32,
}

impl Default for HudModel {
    fn default() -> Self {
        Self {
            score: 0,
            high_score: 0,
            combo: 1,
        }
    }
}

impl HudModel {
    /// Pull fresh values from the simulation, reporting what changed so the
    /// host only touches the DOM for fields that moved
    pub fn observe(&mut self, state: &GameState) -> HudChanges {
        let mut changes = HudChanges::default();

        if state.score != self.score {
            self.score = state.score;
            changes.score = true;
        }
        if self.score > self.high_score {
            self.high_score = self.score;
            changes.high_score = true;
        }
        if state.combo != self.combo {
            self.combo = state.combo;
            changes.combo = true;
        }

        changes
    }
}
