use log::debug;

use crate::domain::hand::HandStatus;
use crate::domain::table::Table;
use crate::domain::PlayerId;
use crate::engine::actions::{ShowdownAction, ShowdownActionKind};
use crate::engine::events::{EventKind, ShowdownEvent};

/// Шоудаун без оценки рук: игроки сами заявляют претензию на банк (`In`)
/// или отказываются от неё (`Out`), `End` фиксирует текущий набор победителей.
#[derive(Debug)]
pub struct Showdown {
    /// Кто был сдан в раздачу.
    participants: Vec<PlayerId>,
    winners: Vec<PlayerId>,
    status: Option<HandStatus>,
}

impl Showdown {
    pub fn play(table: &Table, participants: Vec<PlayerId>) -> Self {
        table.events.emit(EventKind::Showdown(ShowdownEvent::Played));
        Self {
            participants,
            winners: Vec::new(),
            status: None,
        }
    }

    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    pub fn status(&self) -> Option<&HandStatus> {
        self.status.as_ref()
    }

    /// Обработать действие шоудауна. Возвращает итог, если шоудаун закрыт.
    pub fn handle(&mut self, table: &Table, action: &ShowdownAction) -> Option<HandStatus> {
        if self.status.is_some() {
            return None;
        }
        if !self.validate(table, action) {
            debug!("шоудаун: действие {:?} от {} отброшено", action.kind, action.player_id);
            return None;
        }

        match action.kind {
            ShowdownActionKind::In => {
                if !self.winners.contains(&action.player_id) {
                    self.winners.push(action.player_id);
                }
                self.emit_dealt(table);
                None
            }
            ShowdownActionKind::Out => {
                self.winners.retain(|id| *id != action.player_id);
                self.emit_dealt(table);
                None
            }
            ShowdownActionKind::End => {
                self.emit_dealt(table);
                let status = HandStatus::won_by(self.winners.clone());
                table.events.emit(EventKind::Showdown(ShowdownEvent::Ended {
                    winners: self.winners.clone(),
                }));
                self.status = Some(status.clone());
                Some(status)
            }
        }
    }

    /// `In` / `Out` – только игроки раздачи, не сбросившие карты;
    /// `End` может прислать любой участник раздачи.
    fn validate(&self, table: &Table, action: &ShowdownAction) -> bool {
        if !self.participants.contains(&action.player_id) {
            return false;
        }
        match action.kind {
            ShowdownActionKind::In | ShowdownActionKind::Out => table
                .player(action.player_id)
                .map_or(false, |p| !p.is_folded()),
            ShowdownActionKind::End => true,
        }
    }

    fn emit_dealt(&self, table: &Table) {
        table.events.emit(EventKind::Showdown(ShowdownEvent::Dealt {
            winners: self.winners.clone(),
        }));
    }
}
