use std::io::{Cursor, Read, Write};

use zarchive_error::{ArchiveError, ArchiveResult};

use super::{Archive, Channel, Mode};
use crate::config::ArchiveConfig;

/// Архив поверх буфера в памяти.
///
/// Та же раскладка байт, что и у [`super::FileArchive`]; удобен для тестов и
/// для передачи архива по сети целиком.
pub struct MemoryArchive {
    channel: Channel,
    buf: Cursor<Vec<u8>>,
}

impl MemoryArchive {
    pub fn writer() -> Self {
        Self::writer_with_config(ArchiveConfig::default())
    }

    pub fn writer_with_config(config: ArchiveConfig) -> Self {
        Self {
            channel: Channel::new(Mode::Write, config),
            buf: Cursor::new(Vec::new()),
        }
    }

    pub fn reader(bytes: Vec<u8>) -> Self {
        Self::reader_with_config(bytes, ArchiveConfig::default())
    }

    pub fn reader_with_config(
        bytes: Vec<u8>,
        config: ArchiveConfig,
    ) -> Self {
        Self {
            channel: Channel::new(Mode::Read, config),
            buf: Cursor::new(bytes),
        }
    }

    /// Текущая позиция в буфере.
    pub fn position(&self) -> u64 {
        self.buf.position()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf.into_inner()
    }
}

impl Archive for MemoryArchive {
    fn channel(&self) -> &Channel {
        &self.channel
    }

    fn channel_mut(&mut self) -> &mut Channel {
        &mut self.channel
    }

    fn transfer(
        &mut self,
        bytes: &mut [u8],
        context: &'static str,
    ) -> ArchiveResult<()> {
        if !self.channel.ready()? {
            return Ok(());
        }

        let res = match self.channel.mode() {
            Mode::Read => self.buf.read_exact(bytes),
            Mode::Write => self.buf.write_all(bytes),
        };

        match res {
            Ok(()) => Ok(()),
            Err(e) => self
                .channel
                .fail(ArchiveError::from_io(e, context, bytes.len())),
        }
    }
}
