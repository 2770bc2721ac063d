pub mod archive_error;

// Публичный экспорт всех типов ошибок из вложенных модулей.
pub use archive_error::*;
