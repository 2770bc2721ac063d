use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use zarchive_error::{ArchiveError, ArchiveResult};

use super::{Archive, Channel, Mode};
use crate::config::ArchiveConfig;

/// Открытый поток, направление которого зафиксировано режимом архива.
enum Stream {
    Reader(BufReader<File>),
    Writer(BufWriter<File>),
}

/// Архив поверх одного бинарного файла.
///
/// Владеет файлом эксклюзивно на всё время жизни. Файл закрывается при
/// `drop` при любом пути выхода; буфер записи при этом сбрасывается
/// best-effort. Чтобы получить ошибку сброса, используйте
/// [`FileArchive::finish`].
pub struct FileArchive {
    path: PathBuf,
    channel: Channel,
    stream: Option<Stream>,
}

impl FileArchive {
    /// Открывает `path` для чтения ([`Mode::Read`]) или создаёт/обрезает его
    /// для записи ([`Mode::Write`]) с конфигурацией по умолчанию.
    pub fn open(
        path: impl AsRef<Path>,
        mode: Mode,
    ) -> ArchiveResult<Self> {
        Self::with_config(path, mode, ArchiveConfig::default())
    }

    /// Как [`FileArchive::open`], но с явной конфигурацией.
    ///
    /// Если файл не открылся, под политикой `Strict` возвращается
    /// [`ArchiveError::Open`]. Под `Silent` возвращается невалидный архив,
    /// все операции которого — no-op.
    pub fn with_config(
        path: impl AsRef<Path>,
        mode: Mode,
        config: ArchiveConfig,
    ) -> ArchiveResult<Self> {
        let path = path.as_ref().to_path_buf();
        let capacity = config.buffer_capacity;
        let mut channel = Channel::new(mode, config);

        let opened = match mode {
            Mode::Read => {
                File::open(&path).map(|f| Stream::Reader(BufReader::with_capacity(capacity, f)))
            }
            Mode::Write => {
                File::create(&path).map(|f| Stream::Writer(BufWriter::with_capacity(capacity, f)))
            }
        };

        let stream = match opened {
            Ok(stream) => {
                debug!(path = %path.display(), ?mode, "Archive file opened");
                Some(stream)
            }
            Err(source) => {
                channel.fail(ArchiveError::Open {
                    path: path.clone(),
                    access: mode.access(),
                    source,
                })?;
                None
            }
        };

        Ok(Self {
            path,
            channel,
            stream,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Сбрасывает буфер записи и закрывает файл.
    ///
    /// Под политикой `Silent` ошибка сброса логируется и проглатывается.
    pub fn finish(mut self) -> ArchiveResult<()> {
        if !self.channel.ready()? {
            return Ok(());
        }
        if let Some(Stream::Writer(w)) = self.stream.as_mut() {
            if let Err(source) = w.flush() {
                return self.channel.fail(ArchiveError::Io {
                    context: "flushing archive file",
                    source,
                });
            }
        }
        Ok(())
    }
}

impl Archive for FileArchive {
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
        let Some(stream) = self.stream.as_mut() else {
            return Ok(());
        };

        let res = match stream {
            Stream::Reader(r) => r.read_exact(bytes),
            Stream::Writer(w) => w.write_all(bytes),
        };

        match res {
            Ok(()) => Ok(()),
            Err(e) => self
                .channel
                .fail(ArchiveError::from_io(e, context, bytes.len())),
        }
    }
}

impl Drop for FileArchive {
    fn drop(&mut self) {
        if let Some(Stream::Writer(w)) = self.stream.as_mut() {
            if let Err(e) = w.flush() {
                warn!(path = %self.path.display(), error = %e, "Failed to flush archive file");
            }
        }
        if self.stream.take().is_some() {
            debug!(path = %self.path.display(), mode = ?self.channel.mode(), "Archive file closed");
        }
    }
}
