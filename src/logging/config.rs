use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Конфигурация логирования.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Уровень по умолчанию (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub with_target: bool,
    pub with_line_numbers: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: true,
            with_line_numbers: false,
        }
    }
}

impl LoggingConfig {
    /// Директива для `EnvFilter`: уровень применяется к самой библиотеке,
    /// зависимостям — не ниже `warn`.
    pub fn build_filter_directive(&self) -> String {
        format!("warn,zarchive={}", self.level)
    }
}
