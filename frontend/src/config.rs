pub struct Config;

/// How often the overview's online list refreshes.
const REFRESH_INTERVAL_MS: u32 = 30_000;

impl Config {
    /// Prefix for every API path.
    ///
    /// Empty by default: the plugin serves the dashboard and the API from the
    /// same origin. Set `SMPSTATS_API_BASE_URL` at build time to point a
    /// separately hosted bundle at a server.
    pub fn api_base_url() -> String {
        option_env!("SMPSTATS_API_BASE_URL")
            .unwrap_or("")
            .trim_end_matches('/')
            .to_string()
    }

    pub fn refresh_interval_ms() -> u32 {
        REFRESH_INTERVAL_MS
    }
}
