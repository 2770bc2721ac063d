//! Инициализация логирования для бинарника и тестов.
//!
//! Библиотека сама подписчика не ставит: она только пишет события через
//! `tracing`, а приложение решает, куда и в каком формате их выводить.

pub mod config;
pub mod filters;
pub mod formatter;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::{LogFormat, LoggingConfig};

/// Устанавливает глобальный подписчик.
///
/// Повторный вызов возвращает ошибку, а не паникует.
pub fn init_logging(
    config: &LoggingConfig
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = filters::build_filter_from_config(config);

    tracing_subscriber::registry()
        .with(filter)
        .with(formatter::build_fmt_layer(config))
        .try_init()?;

    info!(
        level = %config.level,
        format = ?config.format,
        "Logging initialized"
    );
    Ok(())
}
