use serde::{Deserialize, Serialize};

/// Feature flags served by `/api/public/config`.
///
/// Every flag defaults to enabled, both when the document cannot be fetched
/// and when a single flag is missing from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    pub public_enabled: bool,
    pub show_online_players: bool,
    pub show_leaderboards: bool,
    pub show_recent_moments: bool,
    pub show_server_stats: bool,
    pub admin_enabled: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            public_enabled: true,
            show_online_players: true,
            show_leaderboards: true,
            show_recent_moments: true,
            show_server_stats: true,
            admin_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_parses_server_document() {
        let json = r#"{
            "publicEnabled": true,
            "showOnlinePlayers": true,
            "showLeaderboards": false,
            "showRecentMoments": true,
            "showServerStats": false,
            "adminEnabled": false
        }"#;
        let config: DashboardConfig = serde_json::from_str(json).unwrap();
        assert!(!config.show_leaderboards);
        assert!(!config.show_server_stats);
        assert!(!config.admin_enabled);
        assert!(config.show_recent_moments);
    }

    #[test]
    fn test_missing_flags_stay_enabled() {
        let config: DashboardConfig = serde_json::from_str(r#"{"showLeaderboards": false}"#).unwrap();
        assert_eq!(
            config,
            DashboardConfig {
                show_leaderboards: false,
                ..DashboardConfig::default()
            }
        );
    }
}
