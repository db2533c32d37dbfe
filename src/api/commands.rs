use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Participant;
use crate::domain::{CroupierId, PlayerId, SeatIndex};
use crate::engine::actions::{PlayerAction, ShowdownAction};

/// Входящее действие из общего канала.
///
/// Канал недоверенный: любое действие может оказаться чужим, устаревшим
/// или нелегальным, такие просто отбрасываются. Это же тип операции
/// контракта Linera.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    /// Действие в раунде ставок.
    Player(PlayerAction),
    /// Действие шоудауна.
    Showdown(ShowdownAction),
    /// Управление лобби и матчем.
    Croupier(CroupierAction),
}

/// Команда крупье. `id` – кто её прислал; всё, кроме `SetCroupierId`
/// и `SetOwner`, принимается только от владельца.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CroupierAction {
    pub id: Option<PlayerId>,
    pub kind: CroupierActionKind,
}

impl CroupierAction {
    pub fn new(id: Option<PlayerId>, kind: CroupierActionKind) -> Self {
        Self { id, kind }
    }

    /// Команда от имени владельца.
    pub fn by(id: PlayerId, kind: CroupierActionKind) -> Self {
        Self::new(Some(id), kind)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CroupierActionKind {
    SetCroupierId(CroupierId),
    SetOwner(Participant),
    /// Стартовый стек для новых игроков.
    SetChips(Chips),
    /// Добавить участника в конец лобби.
    Arrange(Participant),
    /// Переставить участника лобби на позицию `index`.
    Reorder { id: PlayerId, index: usize },
    /// Новый матч со свежими стеками. Без `position` дилер выбирается случайно.
    Start {
        wager: Chips,
        position: Option<SeatIndex>,
    },
    /// Новый матч с сохранением стеков оставшихся игроков.
    Restart { wager: Chips },
    Pause,
    End,
}

impl From<PlayerAction> for Action {
    fn from(action: PlayerAction) -> Self {
        Action::Player(action)
    }
}

impl From<ShowdownAction> for Action {
    fn from(action: ShowdownAction) -> Self {
        Action::Showdown(action)
    }
}

impl From<CroupierAction> for Action {
    fn from(action: CroupierAction) -> Self {
        Action::Croupier(action)
    }
}
