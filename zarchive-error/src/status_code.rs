use std::fmt;

use num_enum::IntoPrimitive;
#[cfg(feature = "serde_repr")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Коды статуса для категоризации ошибок архива.
///
/// # Диапазоны:
/// - 1xxx: Внутренние ошибки
/// - 2xxx: Ошибки данных
/// - 5xxx: Хранилище
/// - 6xxx: IO
/// - 8xxx: Формат (фрейминг, длины)
#[cfg_attr(feature = "serde_repr", derive(Serialize_repr, Deserialize_repr))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    Internal = 1003,

    NotFound = 2000,
    InvalidData = 2009,

    StorageUnavailable = 5000,
    CorruptedData = 5002,

    Io = 6000,
    UnexpectedEof = 6007,
    PermissionDenied = 6008,

    FramingMismatch = 8000,
    InvalidUtf8 = 8004,
    SizeLimit = 8007,
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} ({})", self, u32::from(*self))
    }
}
