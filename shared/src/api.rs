//! Endpoint catalogue and the typed client the dashboard talks through.
//!
//! The client is generic over a [`Transport`] so the browser build can plug in
//! `gloo-net` while tests drive it from memory.

use std::rc::Rc;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::dto::admin::{DeathsResponse, HealthSnapshot, HeatmapResponse, SocialResponse};
use crate::dto::auth::{AuthStatus, LoginRequest};
use crate::dto::common::ErrorResponse;
use crate::dto::config::DashboardConfig;
use crate::dto::overview::{OnlinePlayers, ServerStats};
use crate::dto::player::{PlayerRecord, PlayersResponse};
use crate::dto::public::{LeaderboardResponse, MomentsResponse};
use crate::error::{DashboardError, Result};

pub const DEFAULT_LEADERBOARD_DAYS: u32 = 7;
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;
pub const DEFAULT_MOMENTS_LIMIT: u32 = 20;
pub const ADMIN_LIST_LIMIT: u32 = 20;
pub const DEFAULT_HEATMAP_TYPE: &str = "MINING";
pub const DEFAULT_HEATMAP_WORLD: &str = "world";

/// Leaderboard filter controls; `None` means the control is absent or empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub days: Option<u32>,
    pub limit: Option<u32>,
}

impl LeaderboardQuery {
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_LEADERBOARD_DAYS)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MomentsQuery {
    pub limit: Option<u32>,
}

impl MomentsQuery {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_MOMENTS_LIMIT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeatmapQuery {
    pub kind: Option<String>,
    pub world: Option<String>,
}

impl HeatmapQuery {
    pub fn kind(&self) -> &str {
        non_empty(self.kind.as_deref()).unwrap_or(DEFAULT_HEATMAP_TYPE)
    }

    pub fn world(&self) -> &str {
        non_empty(self.world.as_deref()).unwrap_or(DEFAULT_HEATMAP_WORLD)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Config,
    Online,
    Stats,
    Leaderboard(LeaderboardQuery),
    Moments(MomentsQuery),
    AuthCheck,
    Login,
    Logout,
    Health,
    Heatmap(HeatmapQuery),
    Social { limit: u32 },
    Deaths { limit: u32 },
    AllPlayers,
    Player(Uuid),
}

impl Endpoint {
    /// Path plus query string, relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Config => "/api/public/config".to_string(),
            Endpoint::Online => "/api/public/online".to_string(),
            Endpoint::Stats => "/api/public/stats".to_string(),
            Endpoint::Leaderboard(query) => format!(
                "/api/public/leaderboard?days={}&limit={}",
                query.days(),
                query.limit()
            ),
            Endpoint::Moments(query) => format!("/api/public/moments?limit={}", query.limit()),
            Endpoint::AuthCheck => "/api/admin/check".to_string(),
            Endpoint::Login => "/api/admin/login".to_string(),
            Endpoint::Logout => "/api/admin/logout".to_string(),
            Endpoint::Health => "/api/admin/health".to_string(),
            Endpoint::Heatmap(query) => format!(
                "/api/admin/heatmap?type={}&world={}",
                urlencoding::encode(query.kind()),
                urlencoding::encode(query.world())
            ),
            Endpoint::Social { limit } => format!("/api/admin/social?limit={}", limit),
            Endpoint::Deaths { limit } => format!("/api/admin/deaths?limit={}", limit),
            Endpoint::AllPlayers => "/api/admin/player/all".to_string(),
            Endpoint::Player(uuid) => format!("/api/admin/player/{}", uuid),
        }
    }
}

/// Raw HTTP exchange result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of a JSON error body, if there is one.
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(&self.body)
            .ok()
            .and_then(|body| body.error)
    }

    fn into_error(self) -> DashboardError {
        let message = self
            .error_message()
            .unwrap_or_else(|| format!("HTTP {}", self.status));
        DashboardError::Http {
            status: self.status,
            message,
        }
    }
}

/// Moves bytes between the dashboard and the plugin's web server.
///
/// Implementations only fail with [`DashboardError::Network`]; any HTTP
/// status, including errors, comes back as an [`HttpResponse`].
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, path: &str) -> Result<HttpResponse>;

    async fn post_json(&self, path: &str, body: String) -> Result<HttpResponse>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn get(&self, path: &str) -> Result<HttpResponse> {
        (**self).get(path).await
    }

    async fn post_json(&self, path: &str, body: String) -> Result<HttpResponse> {
        (**self).post_json(path, body).await
    }
}

/// Typed access to every dashboard endpoint.
pub struct DashboardApi<T> {
    transport: T,
}

impl<T: Transport> DashboardApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch<D: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<D> {
        let path = endpoint.path();
        debug!("GET {}", path);
        let response = self.transport.get(&path).await?;
        if !response.ok() {
            return Err(response.into_error());
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Like `fetch`, but a 404 means "nothing there yet".
    async fn fetch_optional<D: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<Option<D>> {
        match self.fetch(endpoint).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn config(&self) -> Result<DashboardConfig> {
        self.fetch(&Endpoint::Config).await
    }

    pub async fn auth_status(&self) -> Result<AuthStatus> {
        self.fetch(&Endpoint::AuthCheck).await
    }

    /// Posts the password and hands back the raw exchange; the caller decides
    /// what a rejection looks like to the user.
    pub async fn login(&self, password: &str) -> Result<HttpResponse> {
        let body = serde_json::to_string(&LoginRequest {
            password: password.to_string(),
        })?;
        let path = Endpoint::Login.path();
        debug!("POST {}", path);
        self.transport.post_json(&path, body).await
    }

    pub async fn logout(&self) -> Result<()> {
        let path = Endpoint::Logout.path();
        debug!("GET {}", path);
        let response = self.transport.get(&path).await?;
        if !response.ok() {
            return Err(response.into_error());
        }
        Ok(())
    }

    pub async fn online_players(&self) -> Result<OnlinePlayers> {
        self.fetch(&Endpoint::Online).await
    }

    pub async fn server_stats(&self) -> Result<ServerStats> {
        self.fetch(&Endpoint::Stats).await
    }

    pub async fn leaderboard(&self, query: LeaderboardQuery) -> Result<LeaderboardResponse> {
        self.fetch(&Endpoint::Leaderboard(query)).await
    }

    pub async fn moments(&self, query: MomentsQuery) -> Result<MomentsResponse> {
        self.fetch(&Endpoint::Moments(query)).await
    }

    pub async fn health(&self) -> Result<Option<HealthSnapshot>> {
        self.fetch_optional(&Endpoint::Health).await
    }

    pub async fn heatmap(&self, query: HeatmapQuery) -> Result<HeatmapResponse> {
        self.fetch(&Endpoint::Heatmap(query)).await
    }

    pub async fn social(&self, limit: u32) -> Result<SocialResponse> {
        self.fetch(&Endpoint::Social { limit }).await
    }

    pub async fn deaths(&self, limit: u32) -> Result<DeathsResponse> {
        self.fetch(&Endpoint::Deaths { limit }).await
    }

    pub async fn all_players(&self) -> Result<PlayersResponse> {
        self.fetch(&Endpoint::AllPlayers).await
    }

    pub async fn player(&self, uuid: Uuid) -> Result<Option<PlayerRecord>> {
        self.fetch_optional(&Endpoint::Player(uuid)).await
    }
}
