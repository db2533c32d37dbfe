//! Движок ставок для покерного матча на Linera.
//!
//! Раунды ставок, банк с сайд-потами, шоудаун без оценки рук,
//! серия раздач (матч) и крупье с лобби. Здесь описываем ABI
//! (Operation / Query / Response): операция = входящее действие
//! из общего канала, запросы только читают состояние крупье.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod lobby;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};

pub use crate::api::{Action, CroupierAction, CroupierActionKind, Query, QueryResponse};
pub use crate::config::{ConfigError, CroupierConfig};
pub use crate::domain::{Chips, Participant, PlayerId};
pub use crate::lobby::{Croupier, CroupierStage, Match};

/// Операции, которые принимает контракт: действия игроков, шоудауна и крупье.
pub type ChipChipOperation = Action;

/// Запросы к сервису (read-only).
pub type ChipChipQuery = Query;

/// Ответы на запросы.
pub type ChipChipResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct ChipChipAbi;

impl ContractAbi for ChipChipAbi {
    type Operation = ChipChipOperation;
    type Response = ();
}

impl ServiceAbi for ChipChipAbi {
    type Query = ChipChipQuery;
    type QueryResponse = ChipChipResponse;
}
