use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::{Participant, PlayerSnapshot};
use crate::domain::{CroupierId, PlayerId, SeatIndex};
use crate::engine::events::CroupierStage;
use crate::engine::pot::Pot;

/// DTO текущего матча.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchViewDto {
    pub wager: Chips,
    pub dealer: SeatIndex,
    /// Сколько раздач запущено в этом матче.
    pub hand_number: u64,
    pub playing: bool,
    /// Улица текущей раздачи (None между раздачами).
    pub street: Option<Street>,
    /// Чей сейчас ход.
    pub monitored: Option<PlayerId>,
    pub players: Vec<PlayerSnapshot>,
    pub pots: Vec<Pot>,
}

/// DTO крупье для UI.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CroupierViewDto {
    pub id: CroupierId,
    pub owner: Participant,
    pub stage: CroupierStage,
    /// Стартовый стек.
    pub chips: Chips,
    pub lobby: Vec<Participant>,
    pub current_match: Option<MatchViewDto>,
}
