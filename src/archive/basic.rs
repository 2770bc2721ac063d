//! Fixed-layout («basic») типы: целые числа и числа с плавающей точкой.
//!
//! Скаляр передаётся как `size_of::<T>()` сырых байт в нативном порядке.
//! `Vec<T>` таких типов передаётся одним обрамлённым буфером вместо
//! поэлементного обхода. Выбор пути происходит при мономорфизации через
//! переопределённый [`Serializable::serialize_seq`], а не во время исполнения.
//!
//! Пустая последовательность записывается одним счётчиком `0`, без нулевого
//! фрейма. Архивы, где после нулевого счётчика всё же идёт фрейм `0i32`, этим
//! кодом не читаются: эти 4 байта будут приняты за следующее поле.

use std::mem;

use byteorder::{ByteOrder, NativeEndian};
use zarchive_error::{ArchiveError, ArchiveResult};

use super::{sequence, Archive, Serializable};

mod sealed {
    pub trait Sealed {}
}

/// Скаляр, чьё представление в памяти можно копировать как диапазон байт.
///
/// Трейт запечатан: список типов закрыт, чтобы для любого `T: BasicType`
/// любая последовательность байт нужной длины была валидным значением.
pub trait BasicType: Serializable + Copy + Default + sealed::Sealed {
    const SIZE: usize = mem::size_of::<Self>();

    /// Кодирует `src` в `dst`; `dst.len() == src.len() * SIZE`.
    fn encode_slice(
        src: &[Self],
        dst: &mut [u8],
    );

    /// Декодирует `src` в `dst`; `src.len() == dst.len() * SIZE`.
    fn decode_slice(
        src: &[u8],
        dst: &mut [Self],
    );
}

macro_rules! impl_scalar {
    ($ty:ty) => {
        impl Serializable for $ty {
            fn serialize<A: Archive>(
                &mut self,
                ar: &mut A,
            ) -> ArchiveResult<()> {
                let mut buf = self.to_ne_bytes();
                ar.transfer(&mut buf, stringify!($ty))?;
                if ar.is_valid() {
                    *self = <$ty>::from_ne_bytes(buf);
                }
                Ok(())
            }

            fn serialize_seq<A: Archive>(
                seq: &mut Vec<Self>,
                ar: &mut A,
            ) -> ArchiveResult<()> {
                transcode_bulk(seq, ar)
            }
        }

        impl sealed::Sealed for $ty {}
    };
}

macro_rules! impl_basic {
    ($ty:ty, $write_into:ident, $read_into:ident) => {
        impl_scalar!($ty);

        impl BasicType for $ty {
            fn encode_slice(
                src: &[Self],
                dst: &mut [u8],
            ) {
                NativeEndian::$write_into(src, dst);
            }

            fn decode_slice(
                src: &[u8],
                dst: &mut [Self],
            ) {
                NativeEndian::$read_into(src, dst);
            }
        }
    };
}

impl_scalar!(u8);
impl_scalar!(i8);

impl BasicType for u8 {
    fn encode_slice(
        src: &[Self],
        dst: &mut [u8],
    ) {
        dst.copy_from_slice(src);
    }

    fn decode_slice(
        src: &[u8],
        dst: &mut [Self],
    ) {
        dst.copy_from_slice(src);
    }
}

impl BasicType for i8 {
    fn encode_slice(
        src: &[Self],
        dst: &mut [u8],
    ) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = *s as u8;
        }
    }

    fn decode_slice(
        src: &[u8],
        dst: &mut [Self],
    ) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = *s as i8;
        }
    }
}

impl_basic!(u16, write_u16_into, read_u16_into);
impl_basic!(i16, write_i16_into, read_i16_into);
impl_basic!(u32, write_u32_into, read_u32_into);
impl_basic!(i32, write_i32_into, read_i32_into);
impl_basic!(u64, write_u64_into, read_u64_into);
impl_basic!(i64, write_i64_into, read_i64_into);
impl_basic!(f32, write_f32_into, read_f32_into);
impl_basic!(f64, write_f64_into, read_f64_into);

/// Быстрый путь: `u32` счётчик элементов, затем один обрамлённый буфер.
///
/// Пустая последовательность кодируется одним счётчиком, без фрейма.
pub fn transcode_bulk<T: BasicType, A: Archive>(
    seq: &mut Vec<T>,
    ar: &mut A,
) -> ArchiveResult<()> {
    let Some(count) = sequence::transcode_count(seq.len(), ar)? else {
        return Ok(());
    };

    if count == 0 {
        if ar.is_read() {
            seq.clear();
        }
        return Ok(());
    }

    let byte_len = match count.checked_mul(T::SIZE) {
        Some(n) => n,
        None => {
            return ar.fail(ArchiveError::SizeLimit {
                what: "buffer",
                size: u64::MAX,
                limit: i32::MAX as u64,
            })
        }
    };

    if ar.is_write() {
        let mut raw = vec![0u8; byte_len];
        T::encode_slice(seq, &mut raw);
        return ar.serialize_buffer(&mut raw);
    }

    // Фрейм проверяется до выделения памяти под данные.
    ar.serialize_frame(byte_len)?;
    if !ar.is_valid() {
        return Ok(());
    }
    let Some(raw) = ar.read_bytes(byte_len, "buffer payload")? else {
        return Ok(());
    };

    seq.clear();
    seq.resize(count, T::default());
    T::decode_slice(&raw, seq);
    Ok(())
}
