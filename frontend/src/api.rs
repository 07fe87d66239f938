pub mod transport;

use crate::config::Config;

pub use transport::GlooTransport;

pub fn api_url(path: &str) -> String {
    let base_url = Config::api_base_url();
    if base_url.is_empty() {
        // Use relative URL
        path.to_string()
    } else {
        format!("{}{}", base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_keeps_path() {
        assert!(api_url("/api/public/config").ends_with("/api/public/config"));
    }
}
