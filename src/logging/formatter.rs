use std::io;

use tracing_subscriber::{fmt, registry::LookupSpan, Layer};

use crate::logging::config::{LogFormat, LoggingConfig};

/// Создаёт fmt-слой под выбранный формат.
///
/// Логи всегда уходят в stderr: stdout остаётся за выводом команд.
pub fn build_fmt_layer<S>(config: &LoggingConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let base = fmt::layer()
        .with_writer(io::stderr)
        .with_target(config.with_target)
        .with_line_number(config.with_line_numbers);

    match config.format {
        LogFormat::Json => base
            .with_ansi(false)
            .event_format(fmt::format().json())
            .boxed(),
        LogFormat::Pretty => base
            .with_ansi(config.with_ansi)
            .event_format(fmt::format().pretty())
            .boxed(),
        LogFormat::Compact => base
            .with_ansi(config.with_ansi)
            .event_format(fmt::format().compact())
            .boxed(),
    }
}
