//! Механика ставок: раунды, банк и сайд-поты, шоудаун, раздача.
//!
//! Высокоуровневый объект: `Hand`
//! Основные операции:
//!   - `Hand::start` – запустить раздачу на столе
//!   - `Hand::handle_player` – действие раунда ставок
//!   - `Hand::handle_showdown` – действие шоудауна
//!
//! Всё синхронно: состояние меняется только внутри `handle_*`,
//! наружу уходят события через `Emitter`.

pub mod actions;
pub mod errors;
pub mod events;
pub mod hand;
pub mod pool;
pub mod positions;
pub mod pot;
pub mod round;
pub mod showdown;
pub mod side_pots;
pub mod validation;

pub use actions::{
    ActionRecord, ActionType, PlayerAction, PlayerActionKind, ShowdownAction, ShowdownActionKind,
};
pub use errors::EngineError;
pub use events::{Emitter, Event, EventKind};
pub use hand::{Hand, HandStage};
pub use pool::Pool;
pub use pot::{Outcome, Payout, Pot};
pub use round::Round;
pub use showdown::Showdown;
pub use side_pots::SidePot;
pub use validation::Rejection;
