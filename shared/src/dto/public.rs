use serde::{Deserialize, Serialize};

use crate::dto::common::WorldPosition;

/// Response of `/api/public/leaderboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    /// Window the server actually applied after clamping
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardRow>,
}

/// One timeline row. The server emits these in snake_case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardRow {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub playtime_ms: Option<i64>,
    pub blocks_broken: Option<i64>,
    pub deaths: Option<i64>,
    pub mob_kills: Option<i64>,
}

/// Response of `/api/public/moments`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentsResponse {
    #[serde(default)]
    pub moments: Vec<Moment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Moment {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    #[serde(flatten)]
    pub position: WorldPosition,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
}
