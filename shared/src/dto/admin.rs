use serde::{Deserialize, Serialize};

use crate::dto::common::WorldPosition;

/// Latest server health sample from `/api/admin/health`.
/// A 404 from that endpoint means no sample has been taken yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthSnapshot {
    pub timestamp: Option<i64>,
    pub tps: Option<f64>,
    pub memory_used: Option<i64>,
    pub memory_max: Option<i64>,
    pub chunks: Option<i64>,
    pub entities: Option<i64>,
    pub hoppers: Option<i64>,
    pub redstone: Option<i64>,
    pub cost_index: Option<f64>,
}

/// Response of `/api/admin/heatmap`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatmapResponse {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub world: Option<String>,
    pub grid_size: Option<u32>,
    pub bins: Vec<HeatmapBin>,
}

/// Activity aggregated per chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatmapBin {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub count: Option<f64>,
    pub weight: Option<f64>,
}

impl HeatmapBin {
    /// `count`, falling back to `weight` when the count is absent or zero.
    pub fn value(&self) -> f64 {
        self.count
            .filter(|count| *count != 0.0)
            .or(self.weight)
            .unwrap_or(0.0)
    }
}

/// Response of `/api/admin/social`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialResponse {
    #[serde(default)]
    pub pairs: Vec<SocialPair>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialPair {
    pub player_a: PairMember,
    pub player_b: PairMember,
    pub time_together_seconds: i64,
    pub shared_kills: Option<i64>,
    pub shared_player_kills: Option<i64>,
    pub shared_mob_kills: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairMember {
    pub uuid: Option<String>,
    pub name: Option<String>,
}

/// Response of `/api/admin/deaths`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeathsResponse {
    #[serde(default)]
    pub deaths: Vec<DeathRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeathRecord {
    pub timestamp: Option<i64>,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub cause: Option<String>,
    pub health: Option<f64>,
    #[serde(flatten)]
    pub position: WorldPosition,
    pub fall_distance: Option<f64>,
    pub nearby_players: Vec<String>,
    pub nearby_mobs: Vec<String>,
}
