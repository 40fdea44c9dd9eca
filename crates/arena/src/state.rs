//! Match lifecycle types: phases, modes, progression and outbound events.

use serde::{Deserialize, Serialize};

/// Where the arena is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Menus / lobby. Nothing simulates.
    Idle,
    Playing,
    /// Full halt: ticks return immediately and the clock does not move.
    Paused,
    Victory,
    /// Reserved: nothing in the simulation damages the player yet.
    Defeat,
}

impl GamePhase {
    /// True once a match has ended one way or the other.
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// Match size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// One bot in a small box around the arena center.
    OneVsOne,
    /// Fourteen bots spread over the whole map.
    BattleRoyale,
}

impl MatchMode {
    /// Number of bots spawned at match start.
    pub fn bot_count(&self) -> usize {
        match self {
            MatchMode::OneVsOne => 1,
            MatchMode::BattleRoyale => 14,
        }
    }

    /// Side length of the square spawn box centered on the origin.
    pub fn spawn_box(&self) -> f32 {
        match self {
            MatchMode::OneVsOne => 15.0,
            MatchMode::BattleRoyale => 80.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchMode::OneVsOne => "1v1",
            MatchMode::BattleRoyale => "battle royale",
        }
    }
}

/// Wins needed before the airstrike can be called in.
pub const AIRSTRIKE_UNLOCK_WINS: u32 = 50;

/// Session-local win counter. Drives the weapon tier and the ability unlock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progression {
    pub wins: u32,
}

impl Progression {
    pub fn new(wins: u32) -> Self {
        Self { wins }
    }

    /// 0 wins: rifle. 1-9: shotgun. 10-49: tier 2. 50+: tier 3.
    pub fn weapon_tier(&self) -> u8 {
        match self.wins {
            w if w >= 50 => 3,
            w if w >= 10 => 2,
            w if w >= 1 => 1,
            _ => 0,
        }
    }

    pub fn airstrike_unlocked(&self) -> bool {
        self.wins >= AIRSTRIKE_UNLOCK_WINS
    }

    pub fn record_win(&mut self) {
        self.wins = self.wins.saturating_add(1);
    }
}

/// Notifications for presentation collaborators, drained after each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ArenaEvent {
    /// A bot was removed from the live set.
    EnemyEliminated { id: u32, name: String },
    /// The match is over.
    MatchEnded { won: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_tier_thresholds() {
        assert_eq!(Progression::new(0).weapon_tier(), 0);
        assert_eq!(Progression::new(1).weapon_tier(), 1);
        assert_eq!(Progression::new(9).weapon_tier(), 1);
        assert_eq!(Progression::new(10).weapon_tier(), 2);
        assert_eq!(Progression::new(49).weapon_tier(), 2);
        assert_eq!(Progression::new(50).weapon_tier(), 3);
    }

    #[test]
    fn airstrike_unlocks_at_fifty() {
        let mut p = Progression::new(49);
        assert!(!p.airstrike_unlocked());
        p.record_win();
        assert!(p.airstrike_unlocked());
    }

    #[test]
    fn only_victory_and_defeat_end_a_match() {
        assert!(GamePhase::Victory.is_over());
        assert!(GamePhase::Defeat.is_over());
        assert!(!GamePhase::Playing.is_over());
        assert!(!GamePhase::Paused.is_over());
        assert!(!GamePhase::Idle.is_over());
    }

    #[test]
    fn mode_rosters() {
        assert_eq!(MatchMode::OneVsOne.bot_count(), 1);
        assert_eq!(MatchMode::OneVsOne.spawn_box(), 15.0);
        assert_eq!(MatchMode::BattleRoyale.bot_count(), 14);
        assert_eq!(MatchMode::BattleRoyale.spawn_box(), 80.0);
    }
}
