use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, DatabaseSettings, LoggingSettings, ReportSettings, ServerSettings, SourceKind,
    SourceSettings,
};

/// Prefix of the environment variables that override file settings,
/// e.g. `WEATHER_SALES__SOURCE__KIND=file`.
pub const ENV_PREFIX: &str = "WEATHER_SALES";

/// Loads and validates the application configuration.
///
/// Settings are layered: the TOML file at `path`, then `WEATHER_SALES__*` environment
/// variables, then `DATABASE_URL` for the connection string.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_database_url(path, std::env::var("DATABASE_URL").ok())
}

/// Same as [`load_config`], with the `DATABASE_URL` value supplied by the caller.
pub fn load_config_with_database_url(
    path: &Path,
    database_url: Option<String>,
) -> Result<Config, ConfigError> {
    let config = read_config(path, database_url)?;
    config.validate()?;

    Ok(config)
}

/// Reads the layered configuration without validating it, for callers that apply
/// their own overrides (e.g. command-line flags) before calling [`Config::validate`].
pub fn read_config(path: &Path, database_url: Option<String>) -> Result<Config, ConfigError> {
    read_layers(path, None, database_url)
}

/// `env` replaces the process environment when given.
fn read_layers(
    path: &Path,
    env: Option<config::Map<String, String>>,
    database_url: Option<String>,
) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .set_override_option("database.url", database_url)?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::DegeneratePolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_complete_file() {
        let file = toml_file(
            r#"
            [report]
            city = "Hamburg"
            period_label = "February 2022"
            degenerate_policy = "lenient"

            [source]
            kind = "warehouse"
            environment = "PROD"
            schema = "HARMONIZED"
            table = "WEATHER_HAMBURG"

            [database]
            url = "postgres://localhost/tasty_bytes"
            max_connections = 2

            [server]
            host = "0.0.0.0"
            port = 8080
            "#,
        );

        let config = load_config_with_database_url(file.path(), None).unwrap();
        assert_eq!(config.report.degenerate_policy, DegeneratePolicy::Lenient);
        assert_eq!(config.source.environment, "PROD");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert_eq!(config.server.socket_addr().unwrap().port(), 8080);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn database_url_override_wins() {
        let file = toml_file(
            r#"
            [database]
            url = "postgres://from-file/db"
            "#,
        );

        let config =
            load_config_with_database_url(file.path(), Some("postgres://from-env/db".to_string()))
                .unwrap();
        assert_eq!(config.database.url, "postgres://from-env/db");
        assert_eq!(config.source.kind, SourceKind::Warehouse);
        assert_eq!(config.report.city, "Hamburg");
    }

    #[test]
    fn warehouse_without_url_is_rejected() {
        let file = toml_file("[report]\ncity = \"Hamburg\"\n");
        let err = load_config_with_database_url(file.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("database.url")));
    }

    #[test]
    fn file_source_needs_a_path() {
        let file = toml_file("[source]\nkind = \"file\"\n");
        let err = load_config_with_database_url(file.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("source.file")));

        let file = toml_file("[source]\nkind = \"file\"\nfile = \"data/feb.json\"\n");
        let config = load_config_with_database_url(file.path(), None).unwrap();
        assert_eq!(config.source.file.as_deref(), Some(Path::new("data/feb.json")));
    }

    #[test]
    fn rejects_bad_logging_level() {
        let file = toml_file(
            "[source]\nkind = \"file\"\nfile = \"x.json\"\n[logging]\nlevel = \"weather_sales=verbose\"\n",
        );
        let err = load_config_with_database_url(file.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("logging.level")));
    }

    #[test]
    fn read_config_defers_validation() {
        let file = toml_file("[report]\nperiod_label = \"March 2022\"\n");
        let mut config = read_config(file.path(), None).unwrap();
        assert_eq!(config.report.period_label, "March 2022");
        assert!(config.validate().is_err());

        config.source.kind = SourceKind::File;
        config.source.file = Some("feb.json".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_the_file() {
        let file = toml_file(
            "[source]\nkind = \"warehouse\"\nenvironment = \"STAGING\"\n[server]\nport = 3000\n",
        );
        let env = config::Map::from_iter([
            ("WEATHER_SALES__SOURCE__KIND".to_string(), "file".to_string()),
            ("WEATHER_SALES__SOURCE__FILE".to_string(), "feb.json".to_string()),
            ("WEATHER_SALES__SOURCE__ENVIRONMENT".to_string(), "PROD".to_string()),
            ("WEATHER_SALES__SERVER__PORT".to_string(), "8081".to_string()),
            ("UNRELATED__SERVER__PORT".to_string(), "9999".to_string()),
        ]);

        let config = read_layers(file.path(), Some(env), None).unwrap();
        assert_eq!(config.source.kind, SourceKind::File);
        assert_eq!(config.source.file.as_deref(), Some(Path::new("feb.json")));
        assert_eq!(config.source.environment, "PROD");
        assert_eq!(config.server.port, 8081);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_policy() {
        let file = toml_file(
            "[report]\ndegenerate_policy = \"nan\"\n[source]\nkind = \"file\"\nfile = \"x.json\"\n",
        );
        assert!(matches!(
            load_config_with_database_url(file.path(), None),
            Err(ConfigError::LoadError(_))
        ));
    }
}
