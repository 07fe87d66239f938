//! Drives the dashboard: owns the state, issues requests and pushes views.
//!
//! Every user interaction and timer tick maps onto one method here. Failures
//! are logged and swallowed; the caller never sees an error except through
//! [`DashboardController::login`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::api::{DashboardApi, Transport, ADMIN_LIST_LIMIT};
use crate::dto::auth::LoginOutcome;
use crate::dto::config::DashboardConfig;
use crate::error::Result;
use crate::render::RenderTarget;
use crate::state::{AdminTab, DashboardAction, DashboardState, Section};
use crate::view::{self, Region, View};

/// One kind of request whose responses may overtake each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Online,
    Stats,
    Leaderboard,
    Moments,
    Health,
    Heatmap,
    Social,
    Deaths,
    Players,
    PlayerDetail,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feed::Online => "online players",
            Feed::Stats => "server stats",
            Feed::Leaderboard => "leaderboard",
            Feed::Moments => "moments",
            Feed::Health => "health",
            Feed::Heatmap => "heatmap",
            Feed::Social => "social",
            Feed::Deaths => "deaths",
            Feed::Players => "players",
            Feed::PlayerDetail => "player detail",
        };
        f.write_str(name)
    }
}

/// Latest issued token per feed. Only the newest response is rendered.
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: HashMap<Feed, u64>,
}

impl RequestTokens {
    pub fn begin(&mut self, feed: Feed) -> u64 {
        let token = self.latest.entry(feed).or_insert(0);
        *token += 1;
        *token
    }

    pub fn is_current(&self, feed: Feed, token: u64) -> bool {
        self.latest.get(&feed) == Some(&token)
    }
}

pub struct DashboardController<T, R> {
    api: DashboardApi<T>,
    target: R,
    state: RefCell<DashboardState>,
    tokens: RefCell<RequestTokens>,
    clock: fn() -> DateTime<Utc>,
}

impl<T: Transport, R: RenderTarget> DashboardController<T, R> {
    pub fn new(transport: T, target: R) -> Self {
        Self {
            api: DashboardApi::new(transport),
            target,
            state: RefCell::new(DashboardState::default()),
            tokens: RefCell::new(RequestTokens::default()),
            clock: Utc::now,
        }
    }

    /// Replaces the wall clock used for relative timestamps.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn api(&self) -> &DashboardApi<T> {
        &self.api
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn dispatch(&self, action: DashboardAction) {
        let next = self.state.borrow().clone().reduce(action);
        *self.state.borrow_mut() = next.clone();
        self.target.apply_state(&next);
    }

    fn render(&self, region: Region, view: View) {
        self.target.set_content(region, view);
    }

    fn render_all(&self, views: Vec<(Region, View)>) {
        for (region, view) in views {
            self.render(region, view);
        }
    }

    /// Awaits `request` under a fresh token. `None` if a newer request for
    /// the same feed started meanwhile.
    async fn track<D>(&self, feed: Feed, request: impl Future<Output = Result<D>>) -> Option<Result<D>> {
        let token = self.tokens.borrow_mut().begin(feed);
        let result = request.await;
        if !self.tokens.borrow().is_current(feed, token) {
            debug!("Discarding stale {} response (token {})", feed, token);
            return None;
        }
        Some(result)
    }

    /// [`Self::track`], logging failures.
    async fn fetch_latest<D>(&self, feed: Feed, request: impl Future<Output = Result<D>>) -> Option<D> {
        match self.track(feed, request).await? {
            Ok(data) => Some(data),
            Err(e) => {
                error!("Failed to load {}: {}", feed, e);
                None
            }
        }
    }

    /// Startup sequence: config, auth, then the overview.
    pub async fn init(&self) {
        info!("Initializing dashboard");
        self.load_config().await;
        self.check_auth().await;
        self.load_overview().await;
    }

    pub async fn load_config(&self) {
        let config = match self.api.config().await {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config: {}", e);
                DashboardConfig::default()
            }
        };
        debug!("Dashboard config: {:?}", config);
        self.dispatch(DashboardAction::ConfigLoaded(config));
    }

    pub async fn check_auth(&self) {
        let authenticated = match self.api.auth_status().await {
            Ok(status) => status.authenticated,
            Err(e) => {
                error!("Auth check failed, treating as anonymous: {}", e);
                false
            }
        };
        info!("Admin session active: {}", authenticated);
        self.dispatch(DashboardAction::AuthChecked(authenticated));
    }

    pub async fn login(&self, password: &str) -> LoginOutcome {
        match self.api.login(password).await {
            Ok(response) if response.ok() => {
                info!("Admin login succeeded");
                self.dispatch(DashboardAction::LoginSucceeded);
                self.load_admin_data().await;
                LoginOutcome::succeeded()
            }
            Ok(response) => {
                let message = response
                    .error_message()
                    .unwrap_or_else(|| "Login failed".to_string());
                warn!("Admin login rejected ({}): {}", response.status, message);
                self.dispatch(DashboardAction::LoginFailed(message.clone()));
                LoginOutcome::failed(message)
            }
            Err(e) => {
                error!("Login error: {}", e);
                let message = "Network error";
                self.dispatch(DashboardAction::LoginFailed(message.to_string()));
                LoginOutcome::failed(message)
            }
        }
    }

    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            error!("Logout error: {}", e);
        }
        info!("Admin logged out");
        self.dispatch(DashboardAction::LoggedOut);
        self.show_section(Section::Overview).await;
    }

    pub fn open_login_modal(&self) {
        self.dispatch(DashboardAction::OpenLoginModal);
    }

    pub fn close_login_modal(&self) {
        self.dispatch(DashboardAction::CloseLoginModal);
    }

    pub fn toggle_biomes(&self) {
        self.dispatch(DashboardAction::ToggleBiomes);
    }

    /// Switches sections and runs the new section's loader. Blocked
    /// transitions leave everything as it was.
    pub async fn show_section(&self, section: Section) {
        self.dispatch(DashboardAction::Navigate(section));
        if !self.state.borrow().is_active(section) {
            warn!("Ignoring navigation to {} without an admin session", section);
            return;
        }

        match section {
            Section::Overview => self.load_overview().await,
            Section::Leaderboard => self.load_leaderboard().await,
            Section::Moments => self.load_moments().await,
            Section::Admin => self.load_admin_data().await,
        }
    }

    /// Periodic refresh; only the overview's online list is live.
    pub async fn poll(&self) {
        if self.state.borrow().is_active(Section::Overview) {
            debug!("Refreshing online players");
            self.load_online_players().await;
        }
    }

    pub async fn load_overview(&self) {
        futures::join!(self.load_online_players(), self.load_server_stats());
    }

    pub async fn load_online_players(&self) {
        if !self.state.borrow().feature_enabled(|c| c.show_online_players) {
            return;
        }
        if let Some(online) = self.fetch_latest(Feed::Online, self.api.online_players()).await {
            self.render_all(view::online_views(&online));
        }
    }

    pub async fn load_server_stats(&self) {
        if !self.state.borrow().feature_enabled(|c| c.show_server_stats) {
            return;
        }
        if let Some(stats) = self.fetch_latest(Feed::Stats, self.api.server_stats()).await {
            self.render_all(view::stats_views(&stats));
        }
    }

    pub async fn load_leaderboard(&self) {
        let query = self.state.borrow().leaderboard_query;
        if let Some(board) = self.fetch_latest(Feed::Leaderboard, self.api.leaderboard(query)).await {
            self.render(Region::Leaderboard, view::leaderboard_view(&board));
        }
    }

    pub async fn set_leaderboard_days(&self, days: Option<u32>) {
        self.dispatch(DashboardAction::SetLeaderboardDays(days));
        self.load_leaderboard().await;
    }

    pub async fn set_leaderboard_limit(&self, limit: Option<u32>) {
        self.dispatch(DashboardAction::SetLeaderboardLimit(limit));
        self.load_leaderboard().await;
    }

    pub async fn load_moments(&self) {
        let query = self.state.borrow().moments_query;
        if let Some(moments) = self.fetch_latest(Feed::Moments, self.api.moments(query)).await {
            self.render(Region::Moments, view::moments_view(&moments, self.now()));
        }
    }

    pub async fn set_moments_limit(&self, limit: Option<u32>) {
        self.dispatch(DashboardAction::SetMomentsLimit(limit));
        self.load_moments().await;
    }

    /// Entry point of the admin section: always opens on the health tab.
    pub async fn load_admin_data(&self) {
        if !self.state.borrow().is_admin {
            return;
        }
        self.select_admin_tab(AdminTab::Health).await;
    }

    pub async fn select_admin_tab(&self, tab: AdminTab) {
        self.dispatch(DashboardAction::SelectAdminTab(tab));
        self.load_admin_tab(tab).await;
    }

    pub async fn load_admin_tab(&self, tab: AdminTab) {
        if !self.state.borrow().is_admin {
            debug!("Skipping {} tab without an admin session", tab.name());
            return;
        }
        match tab {
            AdminTab::Health => self.load_health().await,
            AdminTab::Social => self.load_social().await,
            AdminTab::Deaths => self.load_deaths().await,
            AdminTab::Players => self.load_all_players().await,
            // Heatmaps are only drawn on request.
            AdminTab::Heatmap => {}
        }
    }

    pub async fn load_health(&self) {
        if let Some(snapshot) = self.fetch_latest(Feed::Health, self.api.health()).await {
            if snapshot.is_none() {
                debug!("No health sample yet");
            }
            self.render_all(view::health_views(snapshot.as_ref()));
        }
    }

    pub fn set_heatmap_type(&self, kind: Option<String>) {
        self.dispatch(DashboardAction::SetHeatmapType(kind));
    }

    pub fn set_heatmap_world(&self, world: Option<String>) {
        self.dispatch(DashboardAction::SetHeatmapWorld(world));
    }

    pub async fn load_heatmap(&self) {
        let query = self.state.borrow().heatmap_query.clone();
        self.render(Region::Heatmap, View::placeholder(view::LOADING_HEATMAP));

        let Some(result) = self.track(Feed::Heatmap, self.api.heatmap(query)).await else {
            return;
        };
        match result {
            Ok(heatmap) => {
                debug!("Heatmap has {} bins", heatmap.bins.len());
                self.render(Region::Heatmap, view::heatmap_view(&heatmap));
                self.dispatch(DashboardAction::HeatmapShown);
            }
            Err(e) => {
                error!("Failed to load heatmap: {}", e);
                self.render(Region::Heatmap, View::placeholder(view::HEATMAP_FAILED));
            }
        }
    }

    pub async fn load_social(&self) {
        if let Some(social) = self.fetch_latest(Feed::Social, self.api.social(ADMIN_LIST_LIMIT)).await {
            self.render(Region::Social, view::social_view(&social));
        }
    }

    pub async fn load_deaths(&self) {
        if let Some(deaths) = self.fetch_latest(Feed::Deaths, self.api.deaths(ADMIN_LIST_LIMIT)).await {
            self.render(Region::Deaths, view::deaths_view(&deaths, self.now()));
        }
    }

    pub async fn load_all_players(&self) {
        if let Some(response) = self.fetch_latest(Feed::Players, self.api.all_players()).await {
            info!("Loaded {} players", response.players.len());
            self.dispatch(DashboardAction::RosterLoaded(response.players));
            self.render_players();
        }
    }

    /// Narrows the cached roster. Never refetches.
    pub fn filter_players(&self, query: &str) {
        self.dispatch(DashboardAction::SearchPlayers(query.to_string()));
        self.render_players();
    }

    fn render_players(&self) {
        let view = {
            let state = self.state.borrow();
            match state.filtered_roster() {
                Some(players) => view::players_view(&players, self.now()),
                None => return,
            }
        };
        self.render(Region::Players, view);
    }

    pub async fn show_player(&self, uuid: Uuid) {
        if let Some(player) = self.fetch_latest(Feed::PlayerDetail, self.api.player(uuid)).await {
            if player.is_none() {
                warn!("Player {} not found", uuid);
            }
            self.render(
                Region::PlayerDetail,
                view::player_detail_view(player.as_ref(), self.now()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokens_are_per_feed() {
        let mut tokens = RequestTokens::default();
        let first = tokens.begin(Feed::Leaderboard);
        let other = tokens.begin(Feed::Moments);
        assert!(tokens.is_current(Feed::Leaderboard, first));
        assert!(tokens.is_current(Feed::Moments, other));

        let second = tokens.begin(Feed::Leaderboard);
        assert!(!tokens.is_current(Feed::Leaderboard, first));
        assert!(tokens.is_current(Feed::Leaderboard, second));
        assert!(tokens.is_current(Feed::Moments, other));
    }

    #[test]
    fn test_unknown_feed_is_not_current() {
        let tokens = RequestTokens::default();
        assert!(!tokens.is_current(Feed::Health, 1));
    }

    #[test]
    fn test_feed_display() {
        assert_eq!(Feed::PlayerDetail.to_string(), "player detail");
        assert_eq!(Feed::Online.to_string(), "online players");
    }
}
