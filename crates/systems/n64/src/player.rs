//! Player stats. They only ever go up.

use crate::tables::STARTING_INVENTORY;
use serde::Serialize;

pub const MAX_HEALTH: u32 = 100;

const STAGE_HEALTH_BONUS: u32 = 20;
const STAGE_MAGIC_BONUS: u32 = 10;
const STAGE_EXPERIENCE_BONUS: u32 = 25;
const COMBO_EXPERIENCE_BONUS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub health: u32,
    pub magic: u32,
    pub position: [f32; 3],
    pub inventory: Vec<String>,
    pub experience: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            health: MAX_HEALTH,
            magic: 50,
            position: [0.0; 3],
            inventory: STARTING_INVENTORY.iter().map(|s| s.to_string()).collect(),
            experience: 0,
        }
    }

    /// Reward for reaching a new stage
    pub fn apply_stage_bonus(&mut self) {
        self.health = (self.health + STAGE_HEALTH_BONUS).min(MAX_HEALTH);
        self.magic += STAGE_MAGIC_BONUS;
        self.experience += STAGE_EXPERIENCE_BONUS;
    }

    /// Reward for landing a special move
    pub fn apply_combo_bonus(&mut self) {
        self.experience += COMBO_EXPERIENCE_BONUS;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Player::new();
        assert_eq!(p.health, 100);
        assert_eq!(p.magic, 50);
        assert_eq!(p.position, [0.0, 0.0, 0.0]);
        assert_eq!(p.inventory, vec!["sword", "shield"]);
        assert_eq!(p.experience, 0);
    }

    #[test]
    fn test_stage_bonus_clamps_health() {
        let mut p = Player::new();
        p.apply_stage_bonus();
        assert_eq!(p.health, 100);
        assert_eq!(p.magic, 60);
        assert_eq!(p.experience, 25);

        p.health = 90;
        p.apply_stage_bonus();
        assert_eq!(p.health, 100);

        p.health = 70;
        p.apply_stage_bonus();
        assert_eq!(p.health, 90);
    }

    #[test]
    fn test_combo_bonus() {
        let mut p = Player::new();
        p.apply_combo_bonus();
        p.apply_combo_bonus();
        assert_eq!(p.experience, 20);
        assert_eq!(p.health, 100);
    }
}
