use std::collections::HashMap;

use log::debug;

use crate::domain::hand::{HandStatus, Street};
use crate::domain::table::Table;
use crate::domain::{Chips, PlayerId, SeatIndex};
use crate::engine::actions::{ActionRecord, ActionType, PlayerAction, PlayerActionKind};
use crate::engine::events::{EventKind, RoundEvent};
use crate::engine::positions::{blind_seats, phase_order};

/// Раунд ставок на одной улице.
///
/// Синхронная машина состояний: после `play` раунд либо уже закрыт
/// (`status()` = Some), либо ждёт действия от `monitored` игрока.
/// Каждое входящее действие подаётся в `handle`; чужие и нелегальные
/// действия молча отбрасываются.
#[derive(Debug)]
pub struct Round {
    is: Street,
    /// Последнее действие каждого игрока на этой улице.
    action_map: HashMap<PlayerId, ActionRecord>,
    /// Места в порядке ходов этой улицы.
    order: Vec<SeatIndex>,
    /// Индекс в `order` текущего ходящего.
    cursor: usize,
    monitored: Option<SeatIndex>,
    status: Option<HandStatus>,
}

impl Round {
    /// Начать улицу: сбросить флаги игроков, на префлопе поставить блайнды,
    /// передать ход первому игроку.
    pub fn play(street: Street, table: &mut Table) -> Self {
        let mut round = Self {
            is: street,
            action_map: HashMap::new(),
            order: phase_order(table.players.len(), table.dealer, street),
            cursor: 0,
            monitored: None,
            status: None,
        };

        table.pool.play_round();

        for player in table.players.iter_mut() {
            let funded = !player.chips().is_zero();
            player.set_joined(funded);
            player.set_action(None);
            player.set_bet(false);
            player.set_optioned(false);
        }

        if street == Street::Preflop {
            round.post_blinds(table);
        }

        let eligible = table.players.iter().filter(|p| p.can_act()).count();
        if eligible < 2 {
            debug!("{:?}: меньше двух игроков могут ходить, улица закрыта сразу", street);
            round.close(table, HandStatus::street_closed());
            return round;
        }

        table.events.emit(EventKind::Round(RoundEvent::Played { street }));

        round.cursor = round.order.len() - 1;
        round.advance(table);
        round
    }

    pub fn is(&self) -> Street {
        self.is
    }

    pub fn action_map(&self) -> &HashMap<PlayerId, ActionRecord> {
        &self.action_map
    }

    pub fn order(&self) -> &[SeatIndex] {
        &self.order
    }

    /// Место игрока, от которого сейчас ждём действие.
    pub fn monitored(&self) -> Option<SeatIndex> {
        self.monitored
    }

    pub fn status(&self) -> Option<&HandStatus> {
        self.status.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_some()
    }

    /// Обработать входящее действие. Возвращает статус, если улица закрылась
    /// именно этим действием.
    pub fn handle(&mut self, table: &mut Table, action: &PlayerAction) -> Option<HandStatus> {
        if self.status.is_some() {
            return None;
        }
        let seat = self.monitored?;

        let player = &table.players[seat];
        if player.id() != action.player_id {
            debug!(
                "{:?}: ход игрока {}, действие от {} отброшено",
                self.is,
                player.id(),
                action.player_id
            );
            return None;
        }
        if let Err(reason) = table.pool.check(player, &action.kind, &self.action_map) {
            debug!("{:?}: действие игрока {} отброшено: {}", self.is, action.player_id, reason);
            return None;
        }

        self.deal(table, seat, &action.kind, false);
        if self.status.is_none() {
            self.advance(table);
        }
        self.status.clone()
    }

    fn post_blinds(&mut self, table: &mut Table) {
        let Some((small, big)) = blind_seats(&table.players, table.dealer) else {
            return;
        };
        if small == big {
            return;
        }

        let small_blind = table.wager;
        let big_blind = table.wager.times(2);
        self.post_blind(table, small, small_blind);
        self.post_blind(table, big, big_blind);

        // Короткий большой блайнд в олл-ине правом хода уже не воспользуется.
        if !table.players[big].is_allin() {
            table.players[big].set_optioned(true);
        }
    }

    fn post_blind(&mut self, table: &mut Table, seat: SeatIndex, amount: Chips) {
        let player = &table.players[seat];
        let level = amount.min(player.wager() + player.chips());
        self.deal(table, seat, &PlayerActionKind::Bet(level), true);
    }

    /// Применить уже проверенное действие.
    fn deal(&mut self, table: &mut Table, seat: SeatIndex, kind: &PlayerActionKind, blinded: bool) {
        Self::clear_valid_actions(table);

        let record = {
            let Table { players, pool, .. } = &mut *table;
            let player = &mut players[seat];
            let record = pool.update(player, kind);
            player.set_action(Some(record));
            record
        };
        self.action_map.insert(table.players[seat].id(), record);

        let outcome = match record.kind {
            ActionType::Check => self.deal_with_checked(table, seat),
            ActionType::Fold => self.deal_with_folded(table, seat),
            ActionType::Call => self.deal_with_called(table, seat),
            ActionType::Bet | ActionType::Raise => Self::deal_with_bet(table, seat, blinded),
        };

        table.events.emit(EventKind::Round(RoundEvent::Dealt {
            street: self.is,
            player: table.players[seat].snapshot(),
            action: record,
            pot: table.pool.total(),
        }));

        if let Some(status) = outcome {
            self.close(table, status);
        }
    }

    fn deal_with_bet(table: &mut Table, seat: SeatIndex, blinded: bool) -> Option<HandStatus> {
        if let Some(previous) = table.players.iter().position(|p| p.is_bettor()) {
            table.players[previous].set_bet(false);
            table.players[previous].set_optioned(false);
        }

        let player = &mut table.players[seat];
        player.set_bet(true);
        if player.chips().is_zero() {
            player.set_allin(true);
        }

        let betable = table
            .players
            .iter()
            .enumerate()
            .any(|(i, p)| i != seat && !p.is_folded() && !p.is_allin() && !p.chips().is_zero());

        (!betable && !blinded).then(HandStatus::street_closed)
    }

    fn deal_with_folded(&mut self, table: &mut Table, seat: SeatIndex) -> Option<HandStatus> {
        let last_to_act = self.is_last_to_act(table, seat);

        table.players[seat].set_folded(true);

        let remaining: Vec<PlayerId> = table
            .players
            .iter()
            .filter(|p| !p.is_folded())
            .map(|p| p.id())
            .collect();

        if remaining.len() == 1 {
            Some(HandStatus::won_by(remaining))
        } else if last_to_act {
            Some(HandStatus::street_closed())
        } else {
            None
        }
    }

    fn deal_with_checked(&mut self, table: &mut Table, seat: SeatIndex) -> Option<HandStatus> {
        let all_checked = Self::contenders_all(table, |kind| {
            matches!(kind, ActionType::Check | ActionType::Call)
        });

        (all_checked && self.is_last_to_act(table, seat)).then(HandStatus::street_closed)
    }

    fn deal_with_called(&mut self, table: &mut Table, seat: SeatIndex) -> Option<HandStatus> {
        let all_called = Self::contenders_all(table, |kind| kind == ActionType::Call);
        let last_to_act = self.is_last_to_act(table, seat);

        let player = &mut table.players[seat];
        if player.chips().is_zero() {
            player.set_allin(true);
        }

        (all_called && last_to_act).then(HandStatus::street_closed)
    }

    /// Все, кто ещё должен отвечать на ставку, походили подходящим образом.
    fn contenders_all(table: &Table, matches: impl Fn(ActionType) -> bool) -> bool {
        table
            .players
            .iter()
            .filter(|p| !p.is_folded() && !p.is_allin() && !p.is_bettor())
            .all(|p| p.action().map_or(false, |a| matches(a.kind)))
    }

    /// Закрывает ли действие игрока на `seat` улицу.
    ///
    /// Считаются только игроки в раздаче, не сбросившие карты; олл-ины
    /// пропускаются, если только это не текущий агрессор.
    /// - агрессора нет: закрывает последний в порядке ходов;
    /// - есть игрок с правом большого блайнда: закрывает он;
    /// - иначе закрывает тот, после кого ход возвращается к агрессору.
    pub fn is_last_to_act(&self, table: &Table, seat: SeatIndex) -> bool {
        let closing: Vec<SeatIndex> = self
            .order
            .iter()
            .copied()
            .filter(|&s| {
                let p = &table.players[s];
                p.is_joined() && !p.is_folded() && (!p.is_allin() || p.is_bettor())
            })
            .collect();

        let Some(position) = closing.iter().position(|&s| s == seat) else {
            return false;
        };

        let bettor = closing.iter().copied().find(|&s| table.players[s].is_bettor());
        let optioned = closing.iter().copied().find(|&s| table.players[s].is_optioned());

        match (bettor, optioned) {
            (None, _) => position == closing.len() - 1,
            (Some(_), Some(optioned)) => optioned == seat,
            (Some(bettor), None) => closing[(position + 1) % closing.len()] == bettor,
        }
    }

    /// Передать ход следующему игроку, который ещё может ходить.
    fn advance(&mut self, table: &mut Table) {
        let n = self.order.len();
        for step in 1..=n {
            let index = (self.cursor + step) % n;
            let seat = self.order[index];
            if table.players[seat].can_act() {
                self.cursor = index;
                self.monitor(table, seat);
                return;
            }
        }

        debug!("{:?}: ходить больше некому", self.is);
        self.close(table, HandStatus::street_closed());
    }

    fn monitor(&mut self, table: &mut Table, seat: SeatIndex) {
        self.monitored = Some(seat);
        Self::clear_valid_actions(table);

        let valid_actions = table.pool.valid_actions(&table.players[seat], &self.action_map);
        table.players[seat].set_valid_actions(valid_actions.clone());

        table.events.emit(EventKind::Round(RoundEvent::Monitored {
            player: table.players[seat].snapshot(),
            valid_actions,
        }));
    }

    /// Закрыть улицу: отделить сайд-поты и сообщить статус.
    fn close(&mut self, table: &mut Table, status: HandStatus) {
        if self.status.is_some() {
            return;
        }
        self.monitored = None;
        Self::clear_valid_actions(table);

        table.pool.end_round(&table.players);

        debug!("{:?}: улица закрыта, {:?}", self.is, status);
        table.events.emit(EventKind::Round(RoundEvent::Ended {
            street: self.is,
            status: status.clone(),
        }));
        self.status = Some(status);
    }

    fn clear_valid_actions(table: &mut Table) {
        for player in table.players.iter_mut() {
            if !player.valid_actions().is_empty() {
                player.set_valid_actions(Vec::new());
            }
        }
    }
}
