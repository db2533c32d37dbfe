use log::{debug, info};

use crate::api::commands::Action;
use crate::domain::chips::Chips;
use crate::domain::hand::HandStatus;
use crate::domain::player::Player;
use crate::domain::table::Table;
use crate::domain::SeatIndex;
use crate::engine::errors::EngineError;
use crate::engine::events::{Emitter, EventKind, MatchEvent};
use crate::engine::hand::Hand;

/// Матч: серия раздач за одним столом с вращением дилерской кнопки.
///
/// Перед каждой раздачей кнопка сдвигается на одно место. Пауза не прерывает
/// текущую раздачу, а лишь не даёт начать следующую.
#[derive(Debug)]
pub struct Match {
    table: Table,
    hand: Option<Hand>,
    playing: bool,
    ended: bool,
    hand_number: u64,
}

impl Match {
    pub fn new(
        players: Vec<Player>,
        wager: Chips,
        position: SeatIndex,
        events: Emitter,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            table: Table::new(players, wager, position, events)?,
            hand: None,
            playing: false,
            ended: false,
            hand_number: 0,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn players(&self) -> &[Player] {
        &self.table.players
    }

    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Идёт ли сейчас раздача.
    pub fn in_hand(&self) -> bool {
        self.hand.is_some()
    }

    /// Запустить матч с текущей позиции дилера.
    pub fn start(&mut self) {
        if self.ended {
            return;
        }
        info!("матч: старт, позиция {}", self.table.dealer);
        self.table.events.emit(EventKind::Match(MatchEvent::Started {
            position: self.table.dealer,
        }));
        self.playing = true;
        self.play();
    }

    /// Передать действие текущей раздаче; по её окончании начать следующую.
    pub fn handle(&mut self, action: &Action) -> Option<HandStatus> {
        let hand = self.hand.as_mut()?;

        let finished = match action {
            Action::Player(action) => hand.handle_player(&mut self.table, action),
            Action::Showdown(action) => hand.handle_showdown(&mut self.table, action),
            Action::Croupier(_) => None,
        };

        if finished.is_some() {
            self.hand = None;
            self.play();
        }
        finished
    }

    /// Следующие раздачи не начинаются; текущая доигрывается.
    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        info!("матч: пауза");
        self.table.events.emit(EventKind::Match(MatchEvent::Paused));
    }

    /// Остановить матч. Текущая раздача брошена, её банк остаётся в Pool.
    pub fn end(&mut self) {
        if self.ended {
            return;
        }
        if self.hand.take().is_some() {
            debug!("матч: текущая раздача прервана");
        }
        self.playing = false;
        self.ended = true;
        info!("матч: конец после {} раздач", self.hand_number);
        self.table.events.emit(EventKind::Match(MatchEvent::Ended));
    }

    /// Начать следующую раздачу, если матч играется и раздачи сейчас нет.
    pub fn play(&mut self) {
        while self.playing && self.hand.is_none() {
            if self.table.funded_count() < 2 {
                info!("матч: фишки остались меньше чем у двух игроков");
                self.end();
                return;
            }

            self.table.dealer = (self.table.dealer + 1) % self.table.players.len();
            self.hand_number += 1;
            self.table.events.emit(EventKind::Match(MatchEvent::Played {
                hand_number: self.hand_number,
                dealer: self.table.dealer,
            }));

            let hand = Hand::start(&mut self.table);
            if !hand.is_finished() {
                self.hand = Some(hand);
            }
        }
    }

    /// Разобрать матч, вернув игроков (для рестарта с сохранёнными стеками).
    pub fn into_players(self) -> Vec<Player> {
        self.table.players
    }
}
