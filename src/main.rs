//! Демонстрационный бинарник zarchive.
//!
//! `demo` записывает эталонную запись в файл, читает её обратно и печатает;
//! `inspect` показывает размер и hex-дамп произвольного архива.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, error, info};
use zarchive::{
    demo::DemoRecord,
    logging::{init_logging, LogFormat, LoggingConfig},
    serialize_from_file_with_config, serialize_to_file_with_config, ArchiveConfig, ArchiveError,
    ErrorExt, FailurePolicy,
};

#[derive(Parser)]
#[command(name = "zarchive")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "zarchive - symmetric binary archive demo", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Политика обработки ошибок архива
    #[arg(
        long,
        value_enum,
        env = "ZARCHIVE_FAILURE_POLICY",
        help = "Политика ошибок: strict (ошибка) или silent (архив молча становится невалидным)"
    )]
    policy: Option<PolicyArg>,
    /// Уровень логирования
    #[arg(
        long,
        default_value = "info",
        help = "Уровень логирования (trace, debug, info, warn, error)"
    )]
    log_level: String,
    /// Формат логов
    #[arg(long, value_enum, default_value = "compact", help = "Формат логов")]
    log_format: LogFormatArg,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Strict,
    Silent,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Compact,
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Записать демо-запись, прочитать её и вывести
    Demo {
        #[arg(long, default_value = "hello.bin", help = "Путь к файлу архива")]
        path: PathBuf,
    },
    /// Показать размер и hex-дамп файла архива
    Inspect {
        #[arg(help = "Путь к файлу архива")]
        path: PathBuf,
    },
    /// Вывести информацию о сборке
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LoggingConfig {
        level: cli.log_level.clone(),
        format: match cli.log_format {
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        },
        ..Default::default()
    };
    init_logging(&log_config).map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;

    let mut config = ArchiveConfig::load().context("failed to load archive configuration")?;
    if let Some(policy) = cli.policy {
        config.failure_policy = match policy {
            PolicyArg::Strict => FailurePolicy::Strict,
            PolicyArg::Silent => FailurePolicy::Silent,
        };
    }
    debug!(?config, "Archive configuration");

    match cli.command {
        Commands::Demo { path } => run_demo(&path, config),
        Commands::Inspect { path } => run_inspect(&path),
        Commands::Version => {
            println!(
                "zarchive {} (commit {}, built {})",
                env!("CARGO_PKG_VERSION"),
                env!("GIT_COMMIT"),
                env!("BUILD_TIME")
            );
            Ok(())
        }
    }
}

fn run_demo(
    path: &Path,
    config: ArchiveConfig,
) -> Result<()> {
    let mut original = DemoRecord::sample();
    serialize_to_file_with_config(&mut original, path, config.clone())
        .map_err(|e| report_archive_error(e, "write", path))?;
    println!("Wrote file!");

    let mut restored = DemoRecord::default();
    serialize_from_file_with_config(&mut restored, path, config)
        .map_err(|e| report_archive_error(e, "read", path))?;
    println!("Read file!");
    println!("{restored}");

    info!(path = %path.display(), equal = (restored == original), "Demo finished");
    Ok(())
}

/// Логирует код статуса и подсказку, наружу отдаёт безопасное сообщение.
fn report_archive_error(
    err: ArchiveError,
    action: &str,
    path: &Path,
) -> anyhow::Error {
    error!(
        code = %err.status_code(),
        hint = err.recovery_hint().unwrap_or("-"),
        error = %err,
        "Archive {action} failed"
    );
    anyhow::anyhow!(
        "failed to {action} {}: {}",
        path.display(),
        err.client_message()
    )
}

fn run_inspect(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    println!("{}: {} bytes", path.display(), bytes.len());

    for (i, chunk) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        println!("{:08x}  {:<47}  |{}|", i * 16, hex.join(" "), ascii);
    }
    Ok(())
}
