use std::{io, path::PathBuf, string::FromUtf8Error};

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибка передачи данных через архив.
///
/// Покрывает все точки отказа: открытие файла, короткое чтение/запись,
/// несовпадение фрейма буфера и повреждённые префиксы длины.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Файл не удалось открыть или создать.
    #[error("Failed to open {} for {}: {}", .path.display(), .access, .source)]
    Open {
        path: PathBuf,
        access: &'static str,
        #[source]
        source: io::Error,
    },

    /// Поток закончился раньше, чем было прочитано значение.
    #[error("Unexpected EOF while reading {context} (expected {expected} bytes)")]
    UnexpectedEof {
        context: &'static str,
        expected: usize,
    },

    /// Любая другая ошибка ввода-вывода (диск заполнен, сброс буфера и т.д.).
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    /// Заявленный во фрейме размер буфера не совпал с ожидаемым.
    #[error("Framing mismatch: expected {expected} bytes, frame declares {found}")]
    FramingMismatch { expected: usize, found: i32 },

    /// Префикс длины не может быть корректным (отрицательный, ноль для строки
    /// и т.п.).
    #[error("Corrupted {what} length: {length}")]
    CorruptedLength { what: &'static str, length: i64 },

    /// Превышен лимит размера.
    #[error("{what} size {size} exceeds limit {limit}")]
    SizeLimit {
        what: &'static str,
        size: u64,
        limit: u64,
    },

    /// Строка в архиве не является валидным UTF-8.
    #[error("Invalid UTF-8 in string field: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// Значение не соответствует своему типу.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Архив уже вернул ошибку ранее и больше не пригоден к использованию.
    #[error("Archive is poisoned by an earlier failure")]
    Poisoned,
}

impl ArchiveError {
    /// Конвертирует `io::Error` короткого чтения/записи в ошибку архива.
    ///
    /// `UnexpectedEof` выделяется в отдельный вариант, остальное — в `Io`.
    pub fn from_io(
        err: io::Error,
        context: &'static str,
        expected: usize,
    ) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEof { context, expected },
            _ => Self::Io {
                context,
                source: err,
            },
        }
    }

    /// Фатальная ли ошибка: нарушен инвариант формата, а не окружения.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FramingMismatch { .. })
    }

    /// Возвращает recovery hint для пользователя.
    pub fn recovery_hint(&self) -> Option<&'static str> {
        match self {
            Self::Open { .. } => Some("Check that the path exists and is accessible"),
            Self::UnexpectedEof { .. } => Some("File may be truncated. Check file integrity"),
            Self::FramingMismatch { .. } => {
                Some("Reader and writer must visit the same field types in the same order")
            }
            Self::SizeLimit { .. } => Some("Increase limits in configuration"),
            _ => None,
        }
    }
}

impl ErrorExt for ArchiveError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Open { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => StatusCode::NotFound,
                io::ErrorKind::PermissionDenied => StatusCode::PermissionDenied,
                _ => StatusCode::StorageUnavailable,
            },
            Self::UnexpectedEof { .. } => StatusCode::UnexpectedEof,
            Self::Io { .. } => StatusCode::Io,
            Self::FramingMismatch { .. } => StatusCode::FramingMismatch,
            Self::CorruptedLength { .. } => StatusCode::CorruptedData,
            Self::SizeLimit { .. } => StatusCode::SizeLimit,
            Self::InvalidUtf8(_) => StatusCode::InvalidUtf8,
            Self::InvalidData(_) => StatusCode::InvalidData,
            Self::Poisoned => StatusCode::Internal,
        }
    }
}
