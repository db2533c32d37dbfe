use crate::domain::SeatIndex;

use thiserror::Error;

/// Ошибки сборки движка (матч, стол).
///
/// Это ошибки интеграции, а не игровые ситуации: нелегальные действия игроков
/// ошибками не являются и молча отбрасываются.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Недостаточно игроков для матча: {0}")]
    NotEnoughPlayers(usize),

    #[error("Размер блайнда должен быть больше нуля")]
    ZeroWager,

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),
}
