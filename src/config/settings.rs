use serde::{Deserialize, Serialize};

use config::{Config, ConfigError, Environment};

/// Реакция архива на отказ ввода-вывода или повреждённые данные.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Каждый отказ возвращается как `ArchiveError`, архив отравляется.
    #[default]
    Strict,
    /// Совместимый режим: отказ логируется, архив становится невалидным,
    /// дальнейшие операции молча ничего не делают. Несовпадение фрейма
    /// буфера остаётся фатальным.
    Silent,
}

/// Archive configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    pub failure_policy: FailurePolicy,
    /// Capacity of the `BufReader`/`BufWriter` wrapping the file.
    pub buffer_capacity: usize,
    /// Upper bound for a decoded sequence element count.
    pub max_sequence_len: u32,
    /// Upper bound for a decoded string length in bytes (terminator excluded).
    pub max_string_len: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Strict,
            buffer_capacity: 8 * 1024,
            max_sequence_len: 1 << 24,
            max_string_len: 1 << 26,
        }
    }
}

impl ArchiveConfig {
    /// Конфигурация совместимого режима (`FailurePolicy::Silent`).
    pub fn silent() -> Self {
        Self {
            failure_policy: FailurePolicy::Silent,
            ..Default::default()
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let cfg = Config::builder()
            // Adding default values
            .set_default("failure_policy", "strict")?
            .set_default("buffer_capacity", defaults.buffer_capacity as u64)?
            .set_default("max_sequence_len", defaults.max_sequence_len as u64)?
            .set_default("max_string_len", defaults.max_string_len as u64)?
            // Add environment variables with the ZARCHIVE_ prefix
            .add_source(Environment::with_prefix("ZARCHIVE").try_parsing(true))
            .build()?;

        cfg.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_load_defaults() {
        env::remove_var("ZARCHIVE_FAILURE_POLICY");
        env::remove_var("ZARCHIVE_MAX_SEQUENCE_LEN");

        let cfg = ArchiveConfig::load().unwrap();
        assert_eq!(cfg, ArchiveConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_env_overrides() {
        env::set_var("ZARCHIVE_FAILURE_POLICY", "silent");
        env::set_var("ZARCHIVE_MAX_SEQUENCE_LEN", "16");

        let cfg = ArchiveConfig::load();

        env::remove_var("ZARCHIVE_FAILURE_POLICY");
        env::remove_var("ZARCHIVE_MAX_SEQUENCE_LEN");

        let cfg = cfg.unwrap();
        assert_eq!(cfg.failure_policy, FailurePolicy::Silent);
        assert_eq!(cfg.max_sequence_len, 16);
        assert_eq!(cfg.buffer_capacity, 8 * 1024);
    }

    #[test]
    fn test_silent_preset() {
        let cfg = ArchiveConfig::silent();
        assert_eq!(cfg.failure_policy, FailurePolicy::Silent);
        assert_eq!(cfg.max_string_len, ArchiveConfig::default().max_string_len);
    }
}
