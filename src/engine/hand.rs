use log::{debug, info};

use crate::domain::hand::{HandStatus, Street};
use crate::domain::table::Table;
use crate::domain::{Chips, PlayerId};
use crate::engine::actions::{PlayerAction, ShowdownAction};
use crate::engine::events::{EventKind, HandEvent};
use crate::engine::round::Round;
use crate::engine::showdown::Showdown;

/// На какой стадии раздача.
#[derive(Debug)]
pub enum HandStage {
    Betting(Round),
    Showdown(Showdown),
    Finished,
}

/// Одна раздача: префлоп → флоп → тёрн → ривер → шоудаун.
///
/// Раздача заканчивается раньше, если на какой-то улице остался один игрок.
/// В конце Pool рассчитывает все банки и выплачивает победителям.
#[derive(Debug)]
pub struct Hand {
    stage: HandStage,
    /// Игроки, сданные в раздачу (с фишками на старте).
    participants: Vec<PlayerId>,
    status: Option<HandStatus>,
}

impl Hand {
    pub fn start(table: &mut Table) -> Self {
        table.events.emit(EventKind::Hand(HandEvent::Started {
            dealer: table.dealer,
        }));

        for player in table.players.iter_mut() {
            let funded = !player.chips().is_zero();
            player.set_joined(funded);
            player.set_folded(!funded);
            player.set_allin(false);
            player.set_bet(false);
        }

        let participants: Vec<PlayerId> = table
            .players
            .iter()
            .filter(|p| p.is_joined())
            .map(|p| p.id())
            .collect();

        table.pool.create_pot(participants.clone(), Chips::ZERO);
        info!(
            "раздача: дилер на месте {}, в игре {:?}",
            table.dealer, participants
        );

        let mut hand = Self {
            stage: HandStage::Finished,
            participants,
            status: None,
        };
        hand.play_from(table, Street::Preflop);
        hand
    }

    pub fn stage(&self) -> &HandStage {
        &self.stage
    }

    pub fn participants(&self) -> &[PlayerId] {
        &self.participants
    }

    /// Текущая улица (None, если раздача закончена).
    pub fn street(&self) -> Option<Street> {
        match &self.stage {
            HandStage::Betting(round) => Some(round.is()),
            HandStage::Showdown(_) => Some(Street::Showdown),
            HandStage::Finished => None,
        }
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.stage {
            HandStage::Betting(round) => Some(round),
            _ => None,
        }
    }

    pub fn showdown(&self) -> Option<&Showdown> {
        match &self.stage {
            HandStage::Showdown(showdown) => Some(showdown),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<&HandStatus> {
        self.status.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_some()
    }

    /// Действие раунда ставок. Возвращает итог, если раздача закончилась.
    pub fn handle_player(&mut self, table: &mut Table, action: &PlayerAction) -> Option<HandStatus> {
        let HandStage::Betting(round) = &mut self.stage else {
            debug!("действие ставки от {} вне раунда ставок", action.player_id);
            return None;
        };

        let street = round.is();
        let status = round.handle(table, action)?;

        if status.completed {
            self.finish(table, status);
        } else {
            self.play_from(table, street.next().unwrap_or(Street::Showdown));
        }
        self.status.clone()
    }

    /// Действие шоудауна. Возвращает итог, если раздача закончилась.
    pub fn handle_showdown(&mut self, table: &mut Table, action: &ShowdownAction) -> Option<HandStatus> {
        let HandStage::Showdown(showdown) = &mut self.stage else {
            debug!("действие шоудауна от {} вне шоудауна", action.player_id);
            return None;
        };

        let status = showdown.handle(table, action)?;
        self.finish(table, status);
        self.status.clone()
    }

    /// Играть улицы начиная с `street`, пока одна из них не станет ждать действий.
    fn play_from(&mut self, table: &mut Table, mut street: Street) {
        loop {
            if !street.is_betting() {
                table.events.emit(EventKind::Hand(HandEvent::Showdown));
                self.stage = HandStage::Showdown(Showdown::play(table, self.participants.clone()));
                return;
            }

            table.events.emit(EventKind::Hand(HandEvent::Played { street }));
            let round = Round::play(street, table);

            match round.status().cloned() {
                None => {
                    self.stage = HandStage::Betting(round);
                    return;
                }
                Some(status) if status.completed => {
                    self.finish(table, status);
                    return;
                }
                Some(_) => street = street.next().unwrap_or(Street::Showdown),
            }
        }
    }

    fn finish(&mut self, table: &mut Table, status: HandStatus) {
        table.pool.end_hand(&status, &mut table.players);

        info!("раздача закончена, победители {:?}", status.winners);
        table.events.emit(EventKind::Hand(HandEvent::Ended {
            status: status.clone(),
        }));

        self.stage = HandStage::Finished;
        self.status = Some(status);
    }
}
