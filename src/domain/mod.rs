//! Доменная модель: фишки, игроки, улицы, стол матча.

pub mod chips;
pub mod hand;
pub mod player;
pub mod table;

// Базовые идентификаторы.
pub type PlayerId = u64;
pub type CroupierId = u64;

/// Индекс места за столом (позиция в списке игроков матча).
pub type SeatIndex = usize;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Chips и т.п.
pub use chips::*;
pub use hand::*;
pub use player::*;
pub use table::*;
