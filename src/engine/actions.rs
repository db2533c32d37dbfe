use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};

/// Тег действия игрока (без суммы). Им же публикуется подсказка `valid_actions`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

/// Тип действия игрока в раунде ставок.
///
/// Суммы у `Bet` / `Raise`: целевой уровень ставки игрока на этой улице,
/// а не прирост.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerActionKind {
    Fold,
    Check,
    /// Уравнять текущую ставку (сумму подставляет Pool).
    Call,
    /// Bet, когда на улице ещё никто не ставил.
    Bet(Chips),
    /// Raise существующей ставки.
    Raise(Chips),
}

impl PlayerActionKind {
    pub fn action_type(&self) -> ActionType {
        match self {
            PlayerActionKind::Fold => ActionType::Fold,
            PlayerActionKind::Check => ActionType::Check,
            PlayerActionKind::Call => ActionType::Call,
            PlayerActionKind::Bet(_) => ActionType::Bet,
            PlayerActionKind::Raise(_) => ActionType::Raise,
        }
    }

    pub fn amount(&self) -> Option<Chips> {
        match self {
            PlayerActionKind::Bet(amount) | PlayerActionKind::Raise(amount) => Some(*amount),
            _ => None,
        }
    }
}

/// Действие игрока, пришедшее из общего канала.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок (по его словам) действует.
    pub player_id: PlayerId,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, kind: PlayerActionKind) -> Self {
        Self { player_id, kind }
    }
}

/// Применённое действие: что сделал игрок и на каком уровне ставки он стоит
/// на текущей улице после этого.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRecord {
    pub kind: ActionType,
    pub wager: Chips,
}

impl ActionRecord {
    pub fn new(kind: ActionType, wager: Chips) -> Self {
        Self { kind, wager }
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(self.kind, ActionType::Bet | ActionType::Raise)
    }
}

/// Действия шоудауна: заявить претензию на банк, отказаться, закрыть шоудаун.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShowdownActionKind {
    In,
    Out,
    End,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownAction {
    pub player_id: PlayerId,
    pub kind: ShowdownActionKind,
}

impl ShowdownAction {
    pub fn new(player_id: PlayerId, kind: ShowdownActionKind) -> Self {
        Self { player_id, kind }
    }
}
