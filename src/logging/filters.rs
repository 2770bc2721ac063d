use tracing_subscriber::EnvFilter;

use crate::logging::config::LoggingConfig;

pub fn build_filter_from_config(config: &LoggingConfig) -> EnvFilter {
    let directive = config.build_filter_directive();

    // Если RUST_LOG задан — используем его.
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => match EnvFilter::try_new(&directive) {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "Invalid log filter directive from config ('{directive}'): {e}; falling back to 'info'"
                );
                EnvFilter::new("info")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_build_filter_from_config_valid_level() {
        env::remove_var("RUST_LOG");
        let cfg = LoggingConfig {
            level: "debug".into(),
            ..Default::default()
        };
        let filter = build_filter_from_config(&cfg);
        assert!(filter.to_string().contains("zarchive=debug"));
    }

    /// Некорректная директива не должна приводить к панике.
    #[test]
    #[serial]
    fn test_build_filter_from_config_invalid_directive() {
        env::remove_var("RUST_LOG");
        let cfg = LoggingConfig {
            level: "not a level!!".into(),
            ..Default::default()
        };
        let _f = build_filter_from_config(&cfg);
    }

    #[test]
    #[serial]
    fn test_build_filter_prefers_env() {
        env::set_var("RUST_LOG", "trace");
        let filter = build_filter_from_config(&LoggingConfig::default());
        env::remove_var("RUST_LOG");
        assert!(!filter.to_string().contains("zarchive="));
    }
}
