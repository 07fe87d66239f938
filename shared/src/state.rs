//! Application state and the pure reducer that moves it between screens.

use std::fmt;

use crate::api::{HeatmapQuery, LeaderboardQuery, MomentsQuery};
use crate::dto::config::DashboardConfig;
use crate::dto::player::PlayerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Overview,
    Leaderboard,
    Moments,
    Admin,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Leaderboard,
        Section::Moments,
        Section::Admin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Leaderboard => "leaderboard",
            Section::Moments => "moments",
            Section::Admin => "admin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.name() == name)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Leaderboard => "Leaderboard",
            Section::Moments => "Moments",
            Section::Admin => "Admin",
        }
    }

    /// Id of the content element for this section.
    pub fn element_id(&self) -> String {
        format!("{}-section", self.name())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminTab {
    Health,
    Heatmap,
    Social,
    Deaths,
    Players,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [
        AdminTab::Health,
        AdminTab::Heatmap,
        AdminTab::Social,
        AdminTab::Deaths,
        AdminTab::Players,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AdminTab::Health => "health",
            AdminTab::Heatmap => "heatmap",
            AdminTab::Social => "social",
            AdminTab::Deaths => "deaths",
            AdminTab::Players => "players",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.name() == name)
    }

    pub fn title(&self) -> &'static str {
        match self {
            AdminTab::Health => "Server Health",
            AdminTab::Heatmap => "Heatmaps",
            AdminTab::Social => "Social",
            AdminTab::Deaths => "Deaths",
            AdminTab::Players => "Players",
        }
    }

    pub fn element_id(&self) -> String {
        format!("admin-{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// `None` until the config request has settled.
    pub config: Option<DashboardConfig>,
    pub is_admin: bool,
    pub active_section: Section,
    pub admin_tab: AdminTab,
    pub leaderboard_query: LeaderboardQuery,
    pub moments_query: MomentsQuery,
    pub heatmap_query: HeatmapQuery,
    pub player_search: String,
    /// Cached `/api/admin/player/all` result; filtering never refetches it.
    pub roster: Option<Vec<PlayerRecord>>,
    pub login_modal_open: bool,
    pub login_error: Option<String>,
    pub biomes_expanded: bool,
    pub heatmap_legend_visible: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            config: None,
            is_admin: false,
            active_section: Section::Overview,
            admin_tab: AdminTab::Health,
            leaderboard_query: LeaderboardQuery::default(),
            moments_query: MomentsQuery::default(),
            heatmap_query: HeatmapQuery::default(),
            player_search: String::new(),
            roster: None,
            login_modal_open: false,
            login_error: None,
            biomes_expanded: false,
            heatmap_legend_visible: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    ConfigLoaded(DashboardConfig),
    AuthChecked(bool),
    LoginSucceeded,
    LoginFailed(String),
    LoggedOut,
    /// Nav click. Ignored for the admin section unless authenticated.
    Navigate(Section),
    SelectAdminTab(AdminTab),
    SetLeaderboardDays(Option<u32>),
    SetLeaderboardLimit(Option<u32>),
    SetMomentsLimit(Option<u32>),
    SetHeatmapType(Option<String>),
    SetHeatmapWorld(Option<String>),
    RosterLoaded(Vec<PlayerRecord>),
    SearchPlayers(String),
    OpenLoginModal,
    CloseLoginModal,
    ToggleBiomes,
    HeatmapShown,
}

impl DashboardState {
    pub fn reduce(self, action: DashboardAction) -> Self {
        match action {
            DashboardAction::ConfigLoaded(config) => Self {
                config: Some(config),
                ..self
            },
            DashboardAction::AuthChecked(authenticated) => Self {
                is_admin: authenticated,
                ..self
            },
            DashboardAction::LoginSucceeded => Self {
                is_admin: true,
                login_modal_open: false,
                login_error: None,
                ..self
            },
            DashboardAction::LoginFailed(error) => Self {
                login_error: Some(error),
                ..self
            },
            DashboardAction::LoggedOut => Self {
                is_admin: false,
                admin_tab: AdminTab::Health,
                player_search: String::new(),
                roster: None,
                heatmap_legend_visible: false,
                ..self
            },
            DashboardAction::Navigate(Section::Admin) if !self.is_admin => self,
            DashboardAction::Navigate(section) => Self {
                active_section: section,
                ..self
            },
            DashboardAction::SelectAdminTab(tab) => Self {
                admin_tab: tab,
                ..self
            },
            DashboardAction::SetLeaderboardDays(days) => Self {
                leaderboard_query: LeaderboardQuery {
                    days,
                    ..self.leaderboard_query
                },
                ..self
            },
            DashboardAction::SetLeaderboardLimit(limit) => Self {
                leaderboard_query: LeaderboardQuery {
                    limit,
                    ..self.leaderboard_query
                },
                ..self
            },
            DashboardAction::SetMomentsLimit(limit) => Self {
                moments_query: MomentsQuery { limit },
                ..self
            },
            DashboardAction::SetHeatmapType(kind) => Self {
                heatmap_query: HeatmapQuery {
                    kind,
                    ..self.heatmap_query
                },
                ..self
            },
            DashboardAction::SetHeatmapWorld(world) => Self {
                heatmap_query: HeatmapQuery {
                    world,
                    ..self.heatmap_query
                },
                ..self
            },
            DashboardAction::RosterLoaded(players) => Self {
                roster: Some(players),
                ..self
            },
            DashboardAction::SearchPlayers(query) => Self {
                player_search: query,
                ..self
            },
            DashboardAction::OpenLoginModal => Self {
                login_modal_open: true,
                login_error: None,
                ..self
            },
            DashboardAction::CloseLoginModal => Self {
                login_modal_open: false,
                ..self
            },
            DashboardAction::ToggleBiomes => Self {
                biomes_expanded: !self.biomes_expanded,
                ..self
            },
            DashboardAction::HeatmapShown => Self {
                heatmap_legend_visible: true,
                ..self
            },
        }
    }

    /// Loaded flags, or the all-enabled default while loading.
    pub fn flags(&self) -> DashboardConfig {
        self.config.unwrap_or_default()
    }

    /// Whether a feature's data may be requested. Nothing is until the config settles.
    pub fn feature_enabled(&self, flag: impl Fn(&DashboardConfig) -> bool) -> bool {
        self.config.as_ref().is_some_and(flag)
    }

    pub fn is_nav_visible(&self, section: Section) -> bool {
        let flags = self.flags();
        match section {
            Section::Overview => true,
            Section::Leaderboard => flags.show_leaderboards,
            Section::Moments => flags.show_recent_moments,
            Section::Admin => self.is_admin,
        }
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active_section == section
    }

    pub fn is_login_button_visible(&self) -> bool {
        !self.is_admin && self.flags().admin_enabled
    }

    pub fn is_logout_button_visible(&self) -> bool {
        self.is_admin
    }

    /// Cached roster narrowed to the current search query.
    pub fn filtered_roster(&self) -> Option<Vec<&PlayerRecord>> {
        let roster = self.roster.as_ref()?;
        Some(
            roster
                .iter()
                .filter(|player| self.player_search.is_empty() || player.matches(&self.player_search))
                .collect(),
        )
    }
}
