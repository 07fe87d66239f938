use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response of `/api/admin/player/all`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayersResponse {
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
}

/// A player's lifetime stats record, as stored by the plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerRecord {
    pub uuid: Option<Uuid>,
    pub name: String,
    pub first_join: Option<i64>,
    pub last_join: Option<i64>,
    pub playtime_millis: i64,
    pub deaths: Option<i64>,
    pub last_death_cause: Option<String>,
    pub player_kills: i64,
    pub mob_kills: i64,
    pub blocks_placed: Option<i64>,
    pub blocks_broken: Option<i64>,
    pub distance_overworld: f64,
    pub distance_nether: f64,
    pub distance_end: f64,
    pub biomes_visited: Vec<String>,
    pub damage_dealt: Option<f64>,
    pub damage_taken: Option<f64>,
    pub items_crafted: Option<i64>,
    pub items_consumed: Option<i64>,
}

impl PlayerRecord {
    pub fn total_kills(&self) -> i64 {
        self.player_kills + self.mob_kills
    }

    /// Case-insensitive substring match on the player name.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
