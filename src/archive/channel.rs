use tracing::warn;
use zarchive_error::{ArchiveError, ArchiveResult};

use super::Mode;
use crate::config::{ArchiveConfig, FailurePolicy};

/// Состояние канала.
///
/// Переходы только в одну сторону: `Valid -> Invalid` (политика `Silent`) или
/// `Valid -> Poisoned` (политика `Strict`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Valid,
    /// Отказ был проглочен; дальнейшие операции — no-op.
    Invalid,
    /// Отказ был возвращён вызывающему; дальнейшие операции — ошибка.
    Poisoned,
}

/// Общая часть любого архива: режим, конфигурация и состояние.
#[derive(Debug, Clone)]
pub struct Channel {
    mode: Mode,
    config: ArchiveConfig,
    state: ChannelState,
}

impl Channel {
    pub fn new(
        mode: Mode,
        config: ArchiveConfig,
    ) -> Self {
        Self {
            mode,
            config,
            state: ChannelState::Valid,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state == ChannelState::Valid
    }

    /// Проверка перед передачей: `Ok(true)` — можно передавать,
    /// `Ok(false)` — тихий no-op, `Err` — архив отравлен.
    pub fn ready(&self) -> ArchiveResult<bool> {
        match self.state {
            ChannelState::Valid => Ok(true),
            ChannelState::Invalid => Ok(false),
            ChannelState::Poisoned => Err(ArchiveError::Poisoned),
        }
    }

    /// Фиксирует отказ согласно [`FailurePolicy`].
    ///
    /// # Panics
    ///
    /// В режиме `Silent` несовпадение фрейма буфера остаётся фатальным и
    /// прерывает выполнение: продолжать чтение со сдвинутой позиции нельзя.
    pub fn fail(
        &mut self,
        err: ArchiveError,
    ) -> ArchiveResult<()> {
        match self.config.failure_policy {
            FailurePolicy::Strict => {
                self.state = ChannelState::Poisoned;
                Err(err)
            }
            FailurePolicy::Silent => {
                if err.is_fatal() {
                    panic!("fatal archive invariant violation: {err}");
                }
                warn!(
                    mode = ?self.mode,
                    error = %err,
                    "Archive failure swallowed, further transfers are no-ops"
                );
                self.state = ChannelState::Invalid;
                Ok(())
            }
        }
    }
}
