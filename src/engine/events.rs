use std::sync::{Arc, Mutex, MutexGuard};

use log::{trace, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::domain::chips::Chips;
use crate::domain::hand::{HandStatus, Street};
use crate::domain::player::{Participant, PlayerSnapshot};
use crate::domain::{CroupierId, PlayerId, SeatIndex};
use crate::engine::actions::{ActionRecord, ActionType};

/// Событие лобби.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LobbyEvent {
    Arranged { participant: Participant },
    Reordered { participants: Vec<Participant> },
}

/// Стадия крупье, как её видит UI.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CroupierStage {
    Preparing,
    Playing,
    Pausing,
    Ended,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CroupierEvent {
    IdSet { id: CroupierId },
    OwnerSet { owner: Participant },
    ChipsSet { chips: Chips },
    Started { wager: Chips, players: Vec<PlayerId> },
    Restarted { wager: Chips, players: Vec<PlayerId> },
    Paused,
    Ended,
    StageChanged { stage: CroupierStage },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchEvent {
    Started { position: SeatIndex },
    /// Запущена следующая раздача.
    Played { hand_number: u64, dealer: SeatIndex },
    Paused,
    Ended,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEvent {
    Started { dealer: SeatIndex },
    /// Переход на следующую улицу.
    Played { street: Street },
    Showdown,
    Ended { status: HandStatus },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundEvent {
    Played { street: Street },
    /// Ход передан игроку.
    Monitored {
        player: PlayerSnapshot,
        valid_actions: Vec<ActionType>,
    },
    /// Действие применено.
    Dealt {
        street: Street,
        player: PlayerSnapshot,
        action: ActionRecord,
        pot: Chips,
    },
    Ended { street: Street, status: HandStatus },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShowdownEvent {
    Played,
    /// Текущий набор претендентов.
    Dealt { winners: Vec<PlayerId> },
    Ended { winners: Vec<PlayerId> },
}

/// Какое поле игрока изменилось (с новым значением).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerChange {
    Chips(Chips),
    Joined(bool),
    Folded(bool),
    Allin(bool),
    Bet(bool),
    Optioned(bool),
    Action(Option<ActionRecord>),
    ValidActions(Vec<ActionType>),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEvent {
    pub player: PlayerSnapshot,
    pub change: PlayerChange,
}

/// Тип события движка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventKind {
    Lobby(LobbyEvent),
    Croupier(CroupierEvent),
    Match(MatchEvent),
    Hand(HandEvent),
    Round(RoundEvent),
    Showdown(ShowdownEvent),
    Player(PlayerEvent),
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub index: u64,
    pub kind: EventKind,
}

#[derive(Default)]
struct EmitterState {
    next_index: u64,
    subscribers: Vec<UnboundedSender<Event>>,
}

/// Общий источник событий крупье.
///
/// Клон дёшев и указывает на тот же список подписчиков, поэтому его раздают
/// всем Match / Hand / Round / Player одного крупье. Подписка делается один раз
/// и переживает смену улиц и раздач.
#[derive(Clone, Default)]
pub struct Emitter {
    state: Arc<Mutex<EmitterState>>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> UnboundedReceiver<Event> {
        let (tx, rx) = unbounded_channel();
        self.lock().subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Разослать событие всем подписчикам. Закрытые получатели выкидываются.
    pub fn emit(&self, kind: EventKind) {
        let mut state = self.lock();

        let event = Event {
            index: state.next_index,
            kind,
        };
        state.next_index += 1;
        trace!("событие #{}: {:?}", event.index, event.kind);

        let before = state.subscribers.len();
        state.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        let dropped = before - state.subscribers.len();
        if dropped > 0 {
            warn!("отписано {} закрытых получателей событий", dropped);
        }
    }

    fn lock(&self) -> MutexGuard<'_, EmitterState> {
        // Паника внутри emit не портит состояние: индекс и список остаются валидными.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
