use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerSnapshot;
use crate::engine::pot::Outcome;

use super::dto::CroupierViewDto;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Состояние крупье, лобби и текущего матча.
    Croupier,

    /// Игроки текущего матча.
    Players,

    /// Итоги сыгранных раздач текущего матча.
    Outcomes,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Croupier(CroupierViewDto),
    Players(Vec<PlayerSnapshot>),
    Outcomes(Vec<Outcome>),
}
