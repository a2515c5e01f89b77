use std::path::PathBuf;

use super::defaults::{DEFAULT_CONFIG_PATH, DEFAULT_GITHUB_API, DEFAULT_REPOSITORY};

/// Run-wide settings, built once at startup and passed to each component
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub config_path: PathBuf,
    /// `owner/name` of the repository receiving result files
    pub repository: String,
    pub branch: Option<String>,
    pub api_base: String,
    /// Absent token disables publishing, extraction still runs
    pub token: Option<String>,
    pub dry_run: bool,
    /// Skip the commit when the remote file already holds the line
    pub skip_unchanged: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            repository: DEFAULT_REPOSITORY.to_string(),
            branch: None,
            api_base: DEFAULT_GITHUB_API.to_string(),
            token: None,
            dry_run: false,
            skip_unchanged: false,
        }
    }
}

impl RunSettings {
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = repository.into();
        self
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Blank tokens count as missing
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_skip_unchanged(mut self, skip_unchanged: bool) -> Self {
        self.skip_unchanged = skip_unchanged;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_missing() {
        let settings = RunSettings::default().with_token(Some("  ".into()));
        assert!(settings.token.is_none());

        let settings = RunSettings::default().with_token(Some("ghp_x".into()));
        assert_eq!(settings.token.as_deref(), Some("ghp_x"));
    }

    #[test]
    fn test_defaults() {
        let settings = RunSettings::default();
        assert_eq!(settings.repository, "keysa191/hasil");
        assert_eq!(settings.api_base, "https://api.github.com");
        assert!(!settings.dry_run);
        assert!(!settings.skip_unchanged);
    }
}
