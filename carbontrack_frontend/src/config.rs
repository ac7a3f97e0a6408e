use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::warn;

use crate::api::sanitize_base_url;
use crate::router::Route;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub request_timeout: Duration,
    pub start_route: Route,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: default_data_dir(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            start_route: Route::Community,
        }
    }
}

impl FrontendConfig {
    /// Reads the `CARBONTRACK_*` variables. Each invalid value falls back to
    /// its own default with a warning; the others are kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());

        let api_url = match var("CARBONTRACK_API_URL") {
            Some(raw) => sanitize_base_url(raw.clone()).unwrap_or_else(|err| {
                warn!("ignoring invalid CARBONTRACK_API_URL {raw:?}: {err:#}");
                DEFAULT_API_URL.to_string()
            }),
            None => DEFAULT_API_URL.to_string(),
        };

        let data_dir = var("CARBONTRACK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let timeout_secs = match var("CARBONTRACK_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!("ignoring invalid CARBONTRACK_HTTP_TIMEOUT_SECS {raw:?}");
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let start_route = match var("CARBONTRACK_START_ROUTE") {
            Some(raw) => Route::parse(&raw).unwrap_or_else(|| {
                warn!("ignoring unknown start route {raw:?}");
                Route::Community
            }),
            None => Route::Community,
        };

        Self {
            api_url,
            data_dir,
            request_timeout: Duration::from_secs(timeout_secs),
            start_route,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("carbontrack"))
        .unwrap_or_else(|| PathBuf::from(".carbontrack"))
}
