use serde::{Deserialize, Serialize};

/// Response of `/api/public/online`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnlinePlayers {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub players: Vec<String>,
}

/// Server-wide aggregates from `/api/public/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerStats {
    pub total_playtime_hours: Option<f64>,
    pub total_deaths: Option<i64>,
    pub total_player_kills: Option<i64>,
    pub total_mob_kills: Option<i64>,
    pub total_players: Option<i64>,
    pub total_blocks_broken: Option<i64>,
    pub total_blocks_placed: Option<i64>,
    pub total_distance_km: Option<f64>,
    pub unique_biomes_discovered: Option<i64>,
    pub biomes_list: Vec<String>,
}

impl ServerStats {
    /// Player and mob kills combined; unknown if either side is missing.
    pub fn total_kills(&self) -> Option<i64> {
        Some(self.total_player_kills? + self.total_mob_kills?)
    }
}
