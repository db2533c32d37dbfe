use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{HandStatus, PlayerId};

/// Банк (основной или сайд-пот) и те, кто за него ещё борется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub participants: Vec<PlayerId>,
    /// Проставляется при расчёте раздачи.
    pub status: Option<HandStatus>,
}

impl Pot {
    pub fn new(participants: Vec<PlayerId>, amount: Chips) -> Self {
        Self {
            amount,
            participants,
            status: None,
        }
    }

    pub fn add(&mut self, amount: Chips) {
        self.amount += amount;
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.participants.contains(&player_id)
    }

    /// Убрать игрока из претендентов (фолд).
    pub fn remove(&mut self, player_id: PlayerId) {
        self.participants.retain(|p| *p != player_id);
    }
}

/// Выплата игроку из конкретного банка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub player_id: PlayerId,
    pub amount: Chips,
}

/// Архивная запись о завершённой раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub status: HandStatus,
    /// Рассчитанные банки (со статусами).
    pub pots: Vec<Pot>,
    pub payouts: Vec<Payout>,
}

impl Outcome {
    /// Сколько всего получил игрок в этой раздаче.
    pub fn paid_to(&self, player_id: PlayerId) -> Chips {
        self.payouts
            .iter()
            .filter(|p| p.player_id == player_id)
            .map(|p| p.amount)
            .sum()
    }
}
