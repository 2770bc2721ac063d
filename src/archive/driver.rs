//! Точки входа «значение ↔ файл» и «значение ↔ байты».
//!
//! Каждая функция создаёт архив ровно на один обход значения и закрывает его
//! сразу после, в том числе при раннем выходе по ошибке.

use std::path::Path;

use tracing::debug;
use zarchive_error::ArchiveResult;

use super::{FileArchive, MemoryArchive, Mode, Serializable};
use crate::config::ArchiveConfig;

/// Записывает `obj` в файл `path` (файл создаётся или обрезается).
pub fn serialize_to_file<T: Serializable>(
    obj: &mut T,
    path: impl AsRef<Path>,
) -> ArchiveResult<()> {
    serialize_to_file_with_config(obj, path, ArchiveConfig::default())
}

pub fn serialize_to_file_with_config<T: Serializable>(
    obj: &mut T,
    path: impl AsRef<Path>,
    config: ArchiveConfig,
) -> ArchiveResult<()> {
    let mut archive = FileArchive::with_config(path, Mode::Write, config)?;
    obj.serialize(&mut archive)?;
    debug!(path = %archive.path().display(), "Value serialized to file");
    archive.finish()
}

/// Заполняет `obj` из файла `path`.
///
/// Под политикой `Silent` отсутствующий файл оставляет `obj` без изменений.
pub fn serialize_from_file<T: Serializable>(
    obj: &mut T,
    path: impl AsRef<Path>,
) -> ArchiveResult<()> {
    serialize_from_file_with_config(obj, path, ArchiveConfig::default())
}

pub fn serialize_from_file_with_config<T: Serializable>(
    obj: &mut T,
    path: impl AsRef<Path>,
    config: ArchiveConfig,
) -> ArchiveResult<()> {
    let mut archive = FileArchive::with_config(path, Mode::Read, config)?;
    obj.serialize(&mut archive)?;
    debug!(path = %archive.path().display(), "Value deserialized from file");
    archive.finish()
}

/// Записывает `obj` в новый буфер.
pub fn serialize_to_bytes<T: Serializable>(obj: &mut T) -> ArchiveResult<Vec<u8>> {
    let mut archive = MemoryArchive::writer();
    obj.serialize(&mut archive)?;
    Ok(archive.into_inner())
}

/// Заполняет `obj` из буфера.
pub fn serialize_from_bytes<T: Serializable>(
    obj: &mut T,
    bytes: &[u8],
) -> ArchiveResult<()> {
    let mut archive = MemoryArchive::reader(bytes.to_vec());
    obj.serialize(&mut archive)
}
