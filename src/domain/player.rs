use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;
use crate::engine::actions::{ActionRecord, ActionType};
use crate::engine::events::{Emitter, EventKind, PlayerChange, PlayerEvent};

/// Участник лобби – то, что не зависит от конкретного матча.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: PlayerId,
    pub name: String,
}

impl Participant {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Неизменяемый снимок состояния игрока (для событий, DTO и тестов).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub chips: Chips,
    pub joined: bool,
    pub folded: bool,
    pub allin: bool,
    pub bet: bool,
    pub optioned: bool,
    pub action: Option<ActionRecord>,
    pub valid_actions: Vec<ActionType>,
}

/// Состояние игрока в матче.
///
/// Пассивная ячейка: сеттеры ничего не проверяют (за легальность отвечают
/// Round и Pool), каждый меняет одно поле и публикует событие с новым значением.
/// Фишки переживают раздачи внутри матча.
#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    chips: Chips,
    joined: bool,
    folded: bool,
    allin: bool,
    /// Игрок – текущий агрессор улицы.
    bet: bool,
    /// Право большого блайнда походить ещё раз.
    optioned: bool,
    /// Последнее действие на текущей улице.
    action: Option<ActionRecord>,
    valid_actions: Vec<ActionType>,
    events: Emitter,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, chips: Chips, events: Emitter) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            joined: false,
            folded: false,
            allin: false,
            bet: false,
            optioned: false,
            action: None,
            valid_actions: Vec::new(),
            events,
        }
    }

    pub fn from_participant(participant: &Participant, chips: Chips, events: Emitter) -> Self {
        Self::new(participant.id, participant.name.clone(), chips, events)
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            name: self.name.clone(),
            chips: self.chips,
            joined: self.joined,
            folded: self.folded,
            allin: self.allin,
            bet: self.bet,
            optioned: self.optioned,
            action: self.action,
            valid_actions: self.valid_actions.clone(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chips(&self) -> Chips {
        self.chips
    }

    pub fn is_joined(&self) -> bool {
        self.joined
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub fn is_allin(&self) -> bool {
        self.allin
    }

    pub fn is_bettor(&self) -> bool {
        self.bet
    }

    pub fn is_optioned(&self) -> bool {
        self.optioned
    }

    pub fn action(&self) -> Option<ActionRecord> {
        self.action
    }

    pub fn valid_actions(&self) -> &[ActionType] {
        &self.valid_actions
    }

    /// Сколько игрок уже поставил на текущей улице.
    pub fn wager(&self) -> Chips {
        self.action.map(|a| a.wager).unwrap_or(Chips::ZERO)
    }

    /// Может ли игрок ещё ходить в этой раздаче.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.allin
    }

    pub fn set_chips(&mut self, chips: Chips) {
        self.chips = chips;
        self.publish(PlayerChange::Chips(chips));
    }

    pub fn set_joined(&mut self, joined: bool) {
        self.joined = joined;
        self.publish(PlayerChange::Joined(joined));
    }

    pub fn set_folded(&mut self, folded: bool) {
        self.folded = folded;
        self.publish(PlayerChange::Folded(folded));
    }

    pub fn set_allin(&mut self, allin: bool) {
        self.allin = allin;
        self.publish(PlayerChange::Allin(allin));
    }

    pub fn set_bet(&mut self, bet: bool) {
        self.bet = bet;
        self.publish(PlayerChange::Bet(bet));
    }

    pub fn set_optioned(&mut self, optioned: bool) {
        self.optioned = optioned;
        self.publish(PlayerChange::Optioned(optioned));
    }

    pub fn set_action(&mut self, action: Option<ActionRecord>) {
        self.action = action;
        self.publish(PlayerChange::Action(action));
    }

    pub fn set_valid_actions(&mut self, valid_actions: Vec<ActionType>) {
        self.valid_actions = valid_actions.clone();
        self.publish(PlayerChange::ValidActions(valid_actions));
    }

    fn publish(&self, change: PlayerChange) {
        self.events.emit(EventKind::Player(PlayerEvent {
            player: self.snapshot(),
            change,
        }));
    }
}
