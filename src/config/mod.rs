mod loader;
mod model;
mod validation;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader, FileConfigLoader, FileSystem, RealFileSystem};
pub use model::{
    AuthChecker, Cache, Config, DEFAULT_VANITY_URL, Farm, Filter, FilterPattern, GlobRule,
    LogLevel, ModuleConfig, Renderer, SessionManagement, StatisticsCategory, StickyConnections,
    VanityUrls,
};
pub use validation::validate_config;
