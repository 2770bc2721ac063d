//! Двунаправленная бинарная сериализация через единый трейт [`Archive`].
//!
//! ## Архитектура
//!
//! Один и тот же код обхода полей ([`Serializable::serialize`]) используется и
//! для записи, и для чтения. Направление передачи задаётся режимом архива
//! ([`Mode`]) при его создании и больше не меняется.
//!
//! ```no_run
//! use zarchive::{
//!     serialize_from_file, serialize_to_file, Archive, ArchiveResult, Serializable,
//! };
//!
//! #[derive(Default)]
//! struct Foo {
//!     integer: i32,
//!     str: String,
//!     vector: Vec<i32>,
//!     vector_str: Vec<String>,
//! }
//!
//! impl Serializable for Foo {
//!     fn serialize<A: Archive>(&mut self, ar: &mut A) -> ArchiveResult<()> {
//!         ar.transcode(&mut self.integer)?;
//!         ar.transcode(&mut self.str)?;
//!         ar.transcode(&mut self.vector)?;
//!         ar.transcode(&mut self.vector_str)
//!     }
//! }
//!
//! let mut foo = Foo { integer: 2, ..Default::default() };
//! serialize_to_file(&mut foo, "hello.bin")?;
//!
//! let mut restored = Foo::default();
//! serialize_from_file(&mut restored, "hello.bin")?;
//! assert_eq!(restored.integer, 2);
//! # Ok::<(), zarchive::ArchiveError>(())
//! ```
//!
//! ## Формат
//!
//! Байты пишутся в нативном порядке, без тегов и версий:
//!
//! ```text
//! i32 / u32 / f64 ...        [u8; size_of::<T>()]
//! String                     i32 len (= bytes + 1), [u8; len] (последний байт 0)
//! Vec<basic>                 u32 count, i32 byte_count, [u8; byte_count]
//! Vec<basic>, count == 0     u32 count (без фрейма 0i32, см. модуль basic)
//! Vec<composite>             u32 count, count × encoding(T)
//! ```
//!
//! ## Модули
//!
//! - [`channel`] — общее состояние архива и политика обработки отказов
//! - [`serializable`] — трейт обхода полей и операторы для скаляров и строк
//! - [`basic`] — fixed-layout типы и быстрый путь для последовательностей
//! - [`sequence`] — поэлементный путь для последовательностей
//! - [`file`] — архив поверх файла
//! - [`memory`] — архив поверх буфера в памяти
//! - [`driver`] — точки входа «значение ↔ файл»

pub mod basic;
pub mod channel;
pub mod driver;
pub mod file;
pub mod memory;
pub mod sequence;
pub mod serializable;

pub use basic::BasicType;
pub use channel::{Channel, ChannelState};
pub use driver::*;
pub use file::FileArchive;
pub use memory::MemoryArchive;
pub use serializable::Serializable;
use zarchive_error::{ArchiveError, ArchiveResult};

use crate::config::ArchiveConfig;

/// Размер порции для чтения буферов переменной длины.
pub const READ_CHUNK: usize = 64 * 1024;

/// Направление передачи данных через архив.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    Read,
}

impl Mode {
    /// Глагол для диагностических сообщений.
    pub fn access(self) -> &'static str {
        match self {
            Mode::Write => "writing",
            Mode::Read => "reading",
        }
    }
}

/// Канал передачи значений, привязанный к одному направлению.
///
/// Реализация обязана предоставить [`Channel`] и сырой примитив
/// [`Archive::transfer`]; всё остальное (фрейминг буферов, запросы режима,
/// обработка отказов) реализовано здесь поверх них.
pub trait Archive {
    fn channel(&self) -> &Channel;

    fn channel_mut(&mut self) -> &mut Channel;

    /// Передаёт `bytes` без какого-либо фрейминга.
    ///
    /// В режиме [`Mode::Write`] содержимое `bytes` уходит в поток, в режиме
    /// [`Mode::Read`] — перезаписывается байтами из потока. Если архив
    /// невалиден (политика `Silent`), вызов ничего не делает и `bytes`
    /// остаётся нетронутым.
    fn transfer(
        &mut self,
        bytes: &mut [u8],
        context: &'static str,
    ) -> ArchiveResult<()>;

    fn mode(&self) -> Mode {
        self.channel().mode()
    }

    fn is_write(&self) -> bool {
        self.mode() == Mode::Write
    }

    fn is_read(&self) -> bool {
        self.mode() == Mode::Read
    }

    /// Пригоден ли архив для дальнейших передач.
    fn is_valid(&self) -> bool {
        self.channel().is_valid()
    }

    fn config(&self) -> &ArchiveConfig {
        self.channel().config()
    }

    /// Фиксирует отказ согласно политике архива.
    ///
    /// `Strict`: архив отравляется, ошибка возвращается. `Silent`: отказ
    /// логируется, архив становится невалидным, возвращается `Ok(())`.
    fn fail(
        &mut self,
        err: ArchiveError,
    ) -> ArchiveResult<()> {
        self.channel_mut().fail(err)
    }

    /// Передаёт `i32` фрейм буфера длиной `expected` байт.
    ///
    /// При чтении заявленный во фрейме размер обязан совпасть с `expected`.
    fn serialize_frame(
        &mut self,
        expected: usize,
    ) -> ArchiveResult<()> {
        let declared = match i32::try_from(expected) {
            Ok(n) => n,
            Err(_) => {
                return self.fail(ArchiveError::SizeLimit {
                    what: "buffer",
                    size: expected as u64,
                    limit: i32::MAX as u64,
                })
            }
        };

        let mut frame = declared.to_ne_bytes();
        self.transfer(&mut frame, "buffer frame")?;
        if !self.is_valid() {
            return Ok(());
        }

        let found = i32::from_ne_bytes(frame);
        if found != declared {
            return self.fail(ArchiveError::FramingMismatch { expected, found });
        }
        Ok(())
    }

    /// Передаёт сырой буфер, обрамлённый `i32` счётчиком байт.
    fn serialize_buffer(
        &mut self,
        bytes: &mut [u8],
    ) -> ArchiveResult<()> {
        self.serialize_frame(bytes.len())?;
        if !self.is_valid() {
            return Ok(());
        }

        tracing::trace!(bytes = bytes.len(), mode = ?self.mode(), "Buffer transfer");
        self.transfer(bytes, "buffer payload")
    }

    /// Читает `len` байт, наращивая буфер порциями по [`READ_CHUNK`].
    ///
    /// Память растёт только по мере того, как данные реально приходят из
    /// потока. `None`, если архив невалиден или отказ был проглочен.
    fn read_bytes(
        &mut self,
        len: usize,
        context: &'static str,
    ) -> ArchiveResult<Option<Vec<u8>>> {
        let mut buf = Vec::with_capacity(len.min(READ_CHUNK));
        while buf.len() < len {
            let start = buf.len();
            let step = (len - start).min(READ_CHUNK);
            buf.resize(start + step, 0);
            self.transfer(&mut buf[start..], context)?;
            if !self.is_valid() {
                return Ok(None);
            }
        }
        Ok(Some(buf))
    }

    /// Прогоняет значение через архив в направлении его режима.
    ///
    /// Одна и та же строка кода пишет значение при записи и заполняет его
    /// при чтении.
    fn transcode<T: Serializable>(
        &mut self,
        value: &mut T,
    ) -> ArchiveResult<()>
    where
        Self: Sized,
    {
        value.serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_queries() {
        let w = MemoryArchive::writer();
        assert!(w.is_write());
        assert!(!w.is_read());
        assert_eq!(w.mode(), Mode::Write);

        let r = MemoryArchive::reader(Vec::new());
        assert!(r.is_read());
        assert!(!r.is_write());
        assert_eq!(Mode::Read.access(), "reading");
    }

    #[test]
    fn test_serialize_buffer_frames_payload() {
        let mut ar = MemoryArchive::writer();
        let mut payload = [1u8, 2, 3];
        ar.serialize_buffer(&mut payload).unwrap();

        let bytes = ar.into_inner();
        assert_eq!(&bytes[..4], &3i32.to_ne_bytes());
        assert_eq!(&bytes[4..], &[1, 2, 3]);

        let mut ar = MemoryArchive::reader(bytes);
        let mut out = [0u8; 3];
        ar.serialize_buffer(&mut out).unwrap();
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn test_serialize_buffer_rejects_wrong_frame() {
        let mut bytes = 5i32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[0; 5]);

        let mut ar = MemoryArchive::reader(bytes);
        let mut out = [0u8; 4];
        let err = ar.serialize_buffer(&mut out).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::FramingMismatch {
                expected: 4,
                found: 5
            }
        ));
        assert_eq!(out, [0; 4]);
    }

    #[test]
    fn test_read_bytes_spans_chunks() {
        let payload: Vec<u8> = (0..READ_CHUNK * 2 + 3).map(|i| i as u8).collect();
        let mut ar = MemoryArchive::reader(payload.clone());
        let out = ar.read_bytes(payload.len(), "payload").unwrap();
        assert_eq!(out, Some(payload));
    }

    #[test]
    fn test_read_bytes_short_input_fails_in_first_chunk() {
        let mut ar = MemoryArchive::reader(vec![1, 2, 3]);
        let err = ar.read_bytes(1 << 30, "payload").unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::UnexpectedEof {
                context: "payload",
                expected: READ_CHUNK
            }
        ));
    }
}
