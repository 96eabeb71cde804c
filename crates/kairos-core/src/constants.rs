/// Forward horizon applied to every expansion, counted from the window start.
pub const DEFAULT_HORIZON_DAYS: u32 = 90;

/// Upper bound on candidate dates examined by a single expansion.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable prefix, e.g. `KAIROS_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "KAIROS";
pub const ENV_SEPARATOR: &str = "__";

pub const CONFIG_FILE_NAME: &str = "kairos.toml";
