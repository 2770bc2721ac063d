use zarchive_error::{ArchiveError, ArchiveResult};

use super::{sequence, Archive};

/// Тип, умеющий описать порядок обхода своих полей.
///
/// Единственный обязательный метод — [`Serializable::serialize`]: он вызывает
/// операторы архива для каждого поля в фиксированном порядке. Один и тот же
/// вызов пишет значение при записи и заполняет его при чтении, поэтому метод
/// не должен зависеть от режима архива.
///
/// [`Serializable::serialize_seq`] задаёт раскладку `Vec<Self>`. По умолчанию
/// элементы кодируются по одному; fixed-layout скаляры переопределяют его
/// быстрым путём через один обрамлённый буфер (см. [`super::basic`]).
pub trait Serializable {
    fn serialize<A: Archive>(
        &mut self,
        ar: &mut A,
    ) -> ArchiveResult<()>;

    fn serialize_seq<A: Archive>(
        seq: &mut Vec<Self>,
        ar: &mut A,
    ) -> ArchiveResult<()>
    where
        Self: Sized + Default,
    {
        sequence::transcode_each(seq, ar)
    }
}

impl<T: Serializable + Default> Serializable for Vec<T> {
    fn serialize<A: Archive>(
        &mut self,
        ar: &mut A,
    ) -> ArchiveResult<()> {
        T::serialize_seq(self, ar)
    }
}

/// Строка: `i32` длина (байты + терминатор), затем байты и завершающий ноль.
impl Serializable for String {
    fn serialize<A: Archive>(
        &mut self,
        ar: &mut A,
    ) -> ArchiveResult<()> {
        let limit = ar.config().max_string_len;
        let mut len: i32 = 0;
        if ar.is_write() {
            let fits = self.len() as u64 <= limit as u64;
            len = match i32::try_from(self.len() + 1) {
                Ok(n) if fits => n,
                _ => {
                    return ar.fail(ArchiveError::SizeLimit {
                        what: "string",
                        size: self.len() as u64,
                        limit: (limit as u64).min(i32::MAX as u64 - 1),
                    })
                }
            };
        }

        len.serialize(ar)?;
        if !ar.is_valid() {
            return Ok(());
        }

        if ar.is_write() {
            let mut buf = Vec::with_capacity(len as usize);
            buf.extend_from_slice(self.as_bytes());
            buf.push(0);
            return ar.transfer(&mut buf, "string body");
        }

        if len < 1 {
            return ar.fail(ArchiveError::CorruptedLength {
                what: "string",
                length: len as i64,
            });
        }
        if (len - 1) as u64 > limit as u64 {
            return ar.fail(ArchiveError::SizeLimit {
                what: "string",
                size: (len - 1) as u64,
                limit: limit as u64,
            });
        }

        let Some(mut buf) = ar.read_bytes(len as usize, "string body")? else {
            return Ok(());
        };

        // Последний байт — слот терминатора.
        buf.pop();
        match String::from_utf8(buf) {
            Ok(s) => {
                *self = s;
                Ok(())
            }
            Err(e) => ar.fail(e.into()),
        }
    }
}

/// `bool` передаётся одним байтом; при чтении допустимы только 0 и 1.
impl Serializable for bool {
    fn serialize<A: Archive>(
        &mut self,
        ar: &mut A,
    ) -> ArchiveResult<()> {
        let mut byte = [*self as u8];
        ar.transfer(&mut byte, "bool")?;
        if !ar.is_valid() {
            return Ok(());
        }
        match byte[0] {
            0 => *self = false,
            1 => *self = true,
            other => {
                return ar.fail(ArchiveError::InvalidData(format!(
                    "bool byte must be 0 or 1, got {other}"
                )))
            }
        }
        Ok(())
    }
}
