//! Headless core of the SMPStats web dashboard.
//!
//! Wire types for the plugin's HTTP API, a typed client over a pluggable
//! [`api::Transport`], display formatters, the heatmap rasteriser, and the
//! [`controller::DashboardController`] that ties them to a
//! [`render::RenderTarget`].

pub mod dto {
    pub mod admin;
    pub mod auth;
    pub mod common;
    pub mod config;
    pub mod overview;
    pub mod player;
    pub mod public;
}

pub mod api;
pub mod controller;
pub mod error;
pub mod format;
pub mod heatmap;
pub mod render;
pub mod state;
pub mod view;

pub use api::{DashboardApi, Endpoint, HttpResponse, Transport};
pub use controller::{DashboardController, Feed};
pub use error::{DashboardError, Result};
pub use render::{MemoryTarget, RenderTarget};
pub use state::{AdminTab, DashboardAction, DashboardState, Section};
pub use view::{Region, View};

// Re-export DTOs
pub use dto::{
    admin::{DeathRecord, DeathsResponse, HealthSnapshot, HeatmapBin, HeatmapResponse, SocialPair, SocialResponse},
    auth::{AuthStatus, LoginOutcome, LoginRequest, LoginResponse},
    common::{ErrorResponse, WorldPosition},
    config::DashboardConfig,
    overview::{OnlinePlayers, ServerStats},
    player::{PlayerRecord, PlayersResponse},
    public::{LeaderboardResponse, LeaderboardRow, Moment, MomentsResponse},
};
