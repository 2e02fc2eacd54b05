//! Configuration loading
//!
//! Layers, lowest to highest precedence:
//! 1. Built-in defaults for the selected environment
//! 2. `config/default.{toml,yaml,json}` (optional)
//! 3. `config/{environment}.{toml,yaml,json}` (optional)
//! 4. `USERHUB_` prefixed environment variables, `__` between sections
//!    (e.g. `USERHUB_SERVER__PORT=9000`)
//! 5. `DATABASE_URL`

use anyhow::Context;
use config::{Config, File};
use std::env;

use uh_shared::{AppConfig, Environment};

const ENV_PREFIX: &str = "USERHUB";

/// Load configuration for the environment named by `APP_ENV`
pub fn load() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();
    load_for(Environment::from_env())
}

/// Load configuration for an explicit environment
pub fn load_for(environment: Environment) -> anyhow::Result<AppConfig> {
    let defaults = Config::try_from(&AppConfig::for_environment(environment))
        .context("failed to serialize default configuration")?;

    let config = Config::builder()
        .add_source(defaults)
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins"),
        )
        .set_override_option("database.url", env::var("DATABASE_URL").ok())
        .context("invalid DATABASE_URL override")?
        .build()
        .context("failed to build configuration")?;

    config
        .try_deserialize::<AppConfig>()
        .context("failed to deserialize configuration")
}
