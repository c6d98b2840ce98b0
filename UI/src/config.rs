//! Runtime settings, read from the environment (and `.env` when present).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TOP_K: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },
}

/// How long a notification stays on screen and how long its fade-out takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub visible: Duration,
    pub fade: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(3000),
            fade: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Origin the `/api/*` paths are resolved against.
    pub base_url: String,
    pub notifications: NotificationTiming,
    pub default_top_k: u32,
    pub request_timeout: Option<Duration>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            notifications: NotificationTiming::default(),
            default_top_k: DEFAULT_TOP_K,
            request_timeout: None,
        }
    }
}

impl UiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let base_url = env::var("PANDAQA_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let visible = parse_var::<u64>("PANDAQA_NOTIFY_VISIBLE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.notifications.visible);
        let fade = parse_var::<u64>("PANDAQA_NOTIFY_FADE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.notifications.fade);
        let default_top_k = parse_var::<u32>("PANDAQA_DEFAULT_TOP_K")?
            .filter(|k| *k > 0)
            .unwrap_or(defaults.default_top_k);
        let request_timeout =
            parse_var::<u64>("PANDAQA_REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs);

        log::debug!("Loaded UI config: base_url={base_url}, top_k={default_top_k}");

        Ok(Self {
            base_url,
            notifications: NotificationTiming { visible, fade },
            default_top_k,
            request_timeout,
        })
    }
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::EnvParse {
                key: key.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_behaviour() {
        let config = UiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.notifications.visible, Duration::from_secs(3));
        assert_eq!(config.notifications.fade, Duration::from_millis(300));
        assert_eq!(config.default_top_k, 3);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn unparsable_variable_is_reported() {
        env::set_var("PANDAQA_TEST_BAD_NUMBER", "soon");
        let err = parse_var::<u64>("PANDAQA_TEST_BAD_NUMBER").unwrap_err();
        assert!(err.to_string().contains("PANDAQA_TEST_BAD_NUMBER"));
        env::remove_var("PANDAQA_TEST_BAD_NUMBER");
    }

    #[test]
    fn unset_variable_is_none() {
        assert!(parse_var::<u64>("PANDAQA_TEST_NEVER_SET").unwrap().is_none());
    }
}
