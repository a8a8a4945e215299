use std::env;

pub const DEFAULT_GLADOS_BASE_URL: &str = "https://glados.cloud";
pub const DEFAULT_PUSHPLUS_BASE_URL: &str = "https://www.pushplus.plus";

const COOKIE_VAR: &str = "GLADOS";
const NOTIFY_VAR: &str = "NOTIFY";
const SERVER_URL_VAR: &str = "GITHUB_SERVER_URL";
const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
const GLADOS_BASE_VAR: &str = "GLADOS_BASE_URL";
const PUSHPLUS_BASE_VAR: &str = "PUSHPLUS_BASE_URL";

/// Where the run comes from. Only used to point failure reports back at the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    pub server_url: Option<String>,
    pub repository: Option<String>,
}

impl RunContext {
    /// `<server/repo>`, with `undefined` standing in for a missing part.
    pub fn diagnostic_link(&self) -> String {
        format!(
            "<{}/{}>",
            self.server_url.as_deref().unwrap_or("undefined"),
            self.repository.as_deref().unwrap_or("undefined"),
        )
    }
}

/// Everything the run needs, read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cookie: Option<String>,
    pub notify_token: Option<String>,
    pub run_context: RunContext,
    pub glados_base_url: String,
    pub pushplus_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookie: None,
            notify_token: None,
            run_context: RunContext::default(),
            glados_base_url: DEFAULT_GLADOS_BASE_URL.to_string(),
            pushplus_base_url: DEFAULT_PUSHPLUS_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let base = |key: &str, default: &str| {
            get(key)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            cookie: get(COOKIE_VAR),
            notify_token: get(NOTIFY_VAR),
            run_context: RunContext {
                server_url: get(SERVER_URL_VAR),
                repository: get(REPOSITORY_VAR),
            },
            glados_base_url: base(GLADOS_BASE_VAR, DEFAULT_GLADOS_BASE_URL),
            pushplus_base_url: base(PUSHPLUS_BASE_VAR, DEFAULT_PUSHPLUS_BASE_URL),
        }
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn with_notify_token(mut self, token: impl Into<String>) -> Self {
        self.notify_token = Some(token.into());
        self
    }

    pub fn with_run_context(mut self, server_url: &str, repository: &str) -> Self {
        self.run_context = RunContext {
            server_url: Some(server_url.to_string()),
            repository: Some(repository.to_string()),
        };
        self
    }

    pub fn with_glados_base_url(mut self, url: impl Into<String>) -> Self {
        self.glados_base_url = url.into();
        self
    }

    pub fn with_pushplus_base_url(mut self, url: impl Into<String>) -> Self {
        self.pushplus_base_url = url.into();
        self
    }
}
