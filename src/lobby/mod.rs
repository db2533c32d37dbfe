//! Верхний уровень: матч (серия раздач), крупье (лобби + матч)
//! и рантайм крупье поверх tokio.

pub mod croupier;
pub mod match_runner;
#[cfg(not(target_arch = "wasm32"))]
pub mod runtime;

pub use crate::engine::events::CroupierStage;
pub use croupier::Croupier;
pub use match_runner::Match;
#[cfg(not(target_arch = "wasm32"))]
pub use runtime::{ActionSender, CroupierRuntime};
