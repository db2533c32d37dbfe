use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => Some(Street::Showdown),
            Street::Showdown => None,
        }
    }

    /// Улица с раундом ставок (всё, кроме шоудауна).
    pub fn is_betting(self) -> bool {
        !matches!(self, Street::Showdown)
    }

    /// Смещение первого ходящего от дилера.
    pub fn first_to_act_offset(self) -> usize {
        match self {
            Street::Preflop => 3,
            _ => 1,
        }
    }
}

/// Итог раунда или шоудауна.
///
/// `completed = true` – раздача закончена (остался один игрок или закрыт шоудаун);
/// `completed = false` без победителей – закончилась только текущая улица.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandStatus {
    pub completed: bool,
    pub winners: Vec<PlayerId>,
}

impl HandStatus {
    /// Улица закрыта, раздача продолжается.
    pub fn street_closed() -> Self {
        Self {
            completed: false,
            winners: Vec::new(),
        }
    }

    /// Раздача закончена, банк забирают `winners`.
    pub fn won_by(winners: Vec<PlayerId>) -> Self {
        Self {
            completed: true,
            winners,
        }
    }
}
