use std::time::Duration;

/// Desktop Chrome user agent sent with every page fetch
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";
pub const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const SEARCH_REFERER: &str = "https://www.google.com/";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_TABLE_CLASS: &str = "liveresult";
pub const DEFAULT_VALUE_SELECTOR: &str = "span.bolaresultmodif";

/// Path appended to the page origin when a session API source has no `api_endpoint`
pub const DEFAULT_API_PATH: &str = "/ajax/result";
pub const API_MARKET_PARAM: &str = "pasaran";

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
pub const DEFAULT_REPOSITORY: &str = "keysa191/hasil";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const TOKEN_ENV: &str = "GH_PAT";
pub const REPOSITORY_ENV: &str = "RESULTSYNC_REPO";
