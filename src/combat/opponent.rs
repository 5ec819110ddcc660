//! Opponent descriptors and loot.

use serde::{Deserialize, Serialize};

/// One loot entry, credited to the inventory when its opponent dies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootEntry {
    pub resource: String,
    pub amount: u32,
}

impl LootEntry {
    #[must_use]
    pub fn new(resource: impl Into<String>, amount: u32) -> Self {
        Self {
            resource: resource.into(),
            amount,
        }
    }
}

/// Immutable description of an opponent.
///
/// Shared between the encounter that spawned it and the slot it occupies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentDescriptor {
    pub name: String,
    /// Wounds dealt to the player each round before defense.
    pub attack: i64,
    /// Subtracted from the player's attack each round.
    pub armor: i64,
    pub max_health: i64,
    #[serde(default)]
    pub loot: Vec<LootEntry>,
}

impl OpponentDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, attack: i64, armor: i64, max_health: i64) -> Self {
        Self {
            name: name.into(),
            attack,
            armor,
            max_health,
            loot: Vec::new(),
        }
    }

    /// Add a loot entry (builder pattern).
    #[must_use]
    pub fn with_loot(mut self, resource: impl Into<String>, amount: u32) -> Self {
        self.loot.push(LootEntry::new(resource, amount));
        self
    }
}

impl std::fmt::Display for OpponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}/{}, {} hp)",
            self.name, self.attack, self.armor, self.max_health
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_builder() {
        let wolf = OpponentDescriptor::new("Wolf", 4, 1, 3)
            .with_loot("pelt", 1)
            .with_loot("meat", 2);

        assert_eq!(wolf.loot.len(), 2);
        assert_eq!(wolf.loot[1], LootEntry::new("meat", 2));
        assert_eq!(wolf.to_string(), "Wolf (4/1, 3 hp)");
    }

    #[test]
    fn test_loot_defaults_when_missing() {
        let json = r#"{"name":"Rat","attack":1,"armor":0,"max_health":1}"#;
        let rat: OpponentDescriptor = serde_json::from_str(json).unwrap();
        assert!(rat.loot.is_empty());
    }
}
