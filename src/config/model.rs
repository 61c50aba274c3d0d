use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default vanity URL endpoint exposed by the publish instance.
pub const DEFAULT_VANITY_URL: &str = "/libs/granite/dispatcher/content/vanityUrls.html";

/// Whole input document: module-level Apache directives plus named farms.
///
/// Farms are kept in an `IndexMap` so iteration (and therefore rendering)
/// follows the order they appear in the TOML document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Module-level settings rendered into `dispatcher.conf`.
    #[serde(default)]
    pub module: ModuleConfig,

    /// Farm definitions, keyed by farm name.
    #[serde(default)]
    pub farms: IndexMap<String, Farm>,
}

/// Dispatcher log verbosity, rendered verbatim into `DispatcherLogLevel`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Settings for the Apache module block (`dispatcher.conf`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Directory where `dispatcher.farms.any` will be placed on the host.
    /// Only used to build the `DispatcherConfig` directive.
    #[serde(default = "default_farms_path")]
    pub farms_path: String,

    /// Dispatcher log file path.
    #[serde(default = "default_log_file")]
    pub log_file: String,

    #[serde(default)]
    pub log_level: LogLevel,

    /// `DispatcherDeclineRoot`: refuse requests for the root `/`.
    #[serde(default = "default_true")]
    pub decline_root: bool,

    /// `DispatcherUseProcessedURL`: pass the rewritten URL to the renderer.
    #[serde(default = "default_true")]
    pub use_processed_url: bool,

    /// `DispatcherPassError`: "0", "1", or status ranges like "400-404,500".
    #[serde(default = "default_pass_error")]
    pub pass_error: String,

    /// `DispatcherKeepAliveTimeout` in seconds; omitted when unset.
    #[serde(default)]
    pub keep_alive_timeout: Option<u32>,

    /// `DispatcherNoCanonURL`; omitted when unset.
    #[serde(default)]
    pub no_canon_url: Option<bool>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            farms_path: default_farms_path(),
            log_file: default_log_file(),
            log_level: LogLevel::default(),
            decline_root: true,
            use_processed_url: true,
            pass_error: default_pass_error(),
            keep_alive_timeout: None,
            no_canon_url: None,
        }
    }
}

/// One farm: a virtual-host grouping of renderers, filters and cache policy.
///
/// Optional sub-records that are `None` (or empty lists where noted) produce
/// no stanza at all in the rendered farm file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Farm {
    /// Two-digit ordering prefix in the include file name.
    #[serde(default)]
    pub priority: u32,

    /// Host names served by this farm. Defaults to the farm name.
    #[serde(default)]
    pub virtualhosts: Vec<String>,

    /// Client headers forwarded to the renderer; empty list omits the stanza.
    #[serde(default)]
    pub clientheaders: Vec<String>,

    #[serde(default = "default_renderers")]
    pub renderers: Vec<Renderer>,

    #[serde(default = "default_filters")]
    pub filters: Vec<Filter>,

    #[serde(default)]
    pub sessionmanagement: Option<SessionManagement>,

    #[serde(default)]
    pub vanity_urls: Option<VanityUrls>,

    #[serde(default)]
    pub propagate_synd_post: bool,

    #[serde(default)]
    pub cache: Option<Cache>,

    #[serde(default)]
    pub auth_checker: Option<AuthChecker>,

    #[serde(default)]
    pub statistics_categories: Vec<StatisticsCategory>,

    #[serde(default)]
    pub sticky_connections: Option<StickyConnections>,

    /// Page the dispatcher polls to decide renderer health.
    #[serde(default)]
    pub health_check: Option<String>,

    #[serde(default)]
    pub retry_delay: Option<u32>,

    #[serde(default)]
    pub number_of_retries: Option<u32>,

    #[serde(default)]
    pub unavailable_penalty: Option<u32>,

    #[serde(default)]
    pub failover: bool,

    /// Append the hardened deny filters and a deny-all allowed client.
    #[serde(default)]
    pub secure: bool,
}

impl Default for Farm {
    fn default() -> Self {
        Self {
            priority: 0,
            virtualhosts: Vec::new(),
            clientheaders: Vec::new(),
            renderers: default_renderers(),
            filters: default_filters(),
            sessionmanagement: None,
            vanity_urls: None,
            propagate_synd_post: false,
            cache: None,
            auth_checker: None,
            statistics_categories: Vec::new(),
            sticky_connections: None,
            health_check: None,
            retry_delay: None,
            number_of_retries: None,
            unavailable_penalty: None,
            failover: false,
            secure: false,
        }
    }
}

/// A backend AEM instance this farm dispatches to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Renderer {
    pub hostname: String,
    pub port: u16,

    /// Connect timeout in milliseconds.
    #[serde(default)]
    pub timeout: Option<u32>,

    /// Response timeout in milliseconds.
    #[serde(default)]
    pub receive_timeout: Option<u32>,

    #[serde(default)]
    pub ipv4: Option<bool>,

    #[serde(default)]
    pub secure: Option<bool>,

    #[serde(default)]
    pub always_resolve: Option<bool>,
}

impl Renderer {
    /// The implicit renderer every farm falls back to.
    #[must_use]
    pub fn localhost() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: 4503,
            timeout: None,
            receive_timeout: None,
            ipv4: None,
            secure: None,
            always_resolve: None,
        }
    }
}

/// One pattern of a request filter: regex patterns render single-quoted,
/// glob/literal patterns double-quoted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FilterPattern {
    #[serde(default)]
    pub regex: bool,
    pub pattern: String,
}

impl FilterPattern {
    #[must_use]
    pub fn glob(pattern: &str) -> Self {
        Self {
            regex: false,
            pattern: pattern.to_string(),
        }
    }

    #[must_use]
    pub fn regex(pattern: &str) -> Self {
        Self {
            regex: true,
            pattern: pattern.to_string(),
        }
    }
}

/// A request filter rule. At least one pattern field must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Filter {
    /// Caller-supplied ordering hint; must be unique, never re-sorted.
    pub rank: u32,
    pub allow: bool,

    #[serde(default)]
    pub method: Option<FilterPattern>,
    #[serde(default)]
    pub query: Option<FilterPattern>,
    #[serde(default)]
    pub protocol: Option<FilterPattern>,
    #[serde(default)]
    pub path: Option<FilterPattern>,
    #[serde(default)]
    pub selectors: Option<FilterPattern>,
    #[serde(default)]
    pub extension: Option<FilterPattern>,
    #[serde(default)]
    pub suffix: Option<FilterPattern>,
    #[serde(default)]
    pub url: Option<FilterPattern>,
}

impl Filter {
    /// True when no pattern field is set; such a filter is rejected by
    /// validation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.method.is_none()
            && self.query.is_none()
            && self.protocol.is_none()
            && self.path.is_none()
            && self.selectors.is_none()
            && self.extension.is_none()
            && self.suffix.is_none()
            && self.url.is_none()
    }

    /// The implicit deny-everything filter every farm starts from.
    #[must_use]
    pub fn deny_all() -> Self {
        Self {
            rank: 0,
            allow: false,
            url: Some(FilterPattern::regex(".*")),
            ..Self::default()
        }
    }
}

/// An allow/deny glob rule used by cache rules, allowed clients, invalidate
/// rules, ignore-url-params and auth-checker lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GlobRule {
    /// Caller-supplied ordering hint; must be unique, never re-sorted.
    pub rank: u32,
    pub glob: String,
    pub allow: bool,
}

impl GlobRule {
    #[must_use]
    pub fn new(rank: u32, glob: &str, allow: bool) -> Self {
        Self {
            rank,
            glob: glob.to_string(),
            allow,
        }
    }
}

/// Cache policy for a farm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Cache {
    pub docroot: String,
    pub rules: Vec<GlobRule>,
    pub allowed_clients: Vec<GlobRule>,

    #[serde(default)]
    pub statfile: Option<String>,
    #[serde(default)]
    pub serve_stale_on_error: Option<bool>,
    #[serde(default)]
    pub allow_authorized: Option<bool>,
    #[serde(default)]
    pub statfileslevel: Option<u32>,
    #[serde(default)]
    pub invalidate: Vec<GlobRule>,
    #[serde(default)]
    pub invalidate_handler: Option<String>,
    #[serde(default)]
    pub ignore_url_params: Vec<GlobRule>,
    /// Response headers persisted alongside cached files.
    #[serde(default)]
    pub headers: Vec<String>,
    /// Octal permission mode for cache files, e.g. "0660".
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub grace_period: Option<u32>,
    #[serde(default)]
    pub enable_ttl: Option<bool>,
}

/// Session management policy (`/sessionmanagement`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SessionManagement {
    pub directory: String,
    #[serde(default)]
    pub encode: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub timeout: Option<u32>,
}

/// Vanity URL policy (`/vanity_urls`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct VanityUrls {
    pub file: String,
    pub delay: u32,
    #[serde(default = "default_vanity_url")]
    pub url: String,
}

/// Permission-sensitive caching (`/auth_checker`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AuthChecker {
    pub url: String,
    pub filters: Vec<GlobRule>,
    pub headers: Vec<GlobRule>,
}

/// One named statistics category (`/statistics /categories`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StatisticsCategory {
    /// Caller-supplied ordering hint; must be unique, never re-sorted.
    pub rank: u32,
    pub name: String,
    pub glob: String,
}

/// Sticky connection policy: either a single path or a detailed block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StickyConnections {
    Path(String),
    Detailed {
        paths: Vec<String>,
        #[serde(default)]
        domain: Option<String>,
        #[serde(default)]
        http_only: Option<bool>,
        #[serde(default)]
        secure: Option<bool>,
    },
}

const fn default_true() -> bool {
    true
}

fn default_farms_path() -> String {
    "/etc/httpd/conf.modules.d".to_string()
}

fn default_log_file() -> String {
    "/var/log/httpd/dispatcher.log".to_string()
}

fn default_pass_error() -> String {
    "0".to_string()
}

fn default_vanity_url() -> String {
    DEFAULT_VANITY_URL.to_string()
}

fn default_renderers() -> Vec<Renderer> {
    vec![Renderer::localhost()]
}

fn default_filters() -> Vec<Filter> {
    vec![Filter::deny_all()]
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
