use std::error::Error;

use crate::StatusCode;

/// Расширение для ошибок библиотеки: статус-код и безопасное сообщение
/// для пользователя.
pub trait ErrorExt: Error + Send + Sync + 'static {
    /// По умолчанию [`StatusCode::Internal`].
    fn status_code(&self) -> StatusCode {
        StatusCode::Internal
    }

    /// Для внутренних ошибок возвращает `"Internal error"`.
    fn client_message(&self) -> String {
        match self.status_code() {
            StatusCode::Internal => "Internal error".to_string(),
            _ => self.to_string(),
        }
    }
}
