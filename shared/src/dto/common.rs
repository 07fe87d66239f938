use serde::{Deserialize, Serialize};

/// Common error response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message, absent when the server sent a bare status
    #[serde(default)]
    pub error: Option<String>,
}

/// Block position inside a named world, as the server reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldPosition {
    #[serde(default)]
    pub world: Option<String>,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub z: i32,
}

impl WorldPosition {
    /// `world (x, y, z)`
    pub fn label(&self) -> String {
        format!(
            "{} ({}, {}, {})",
            self.world.as_deref().unwrap_or("undefined"),
            self.x,
            self.y,
            self.z
        )
    }
}
