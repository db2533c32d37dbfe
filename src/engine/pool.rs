use std::collections::HashMap;

use log::{debug, warn};

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::{HandStatus, PlayerId};
use crate::engine::actions::{ActionRecord, ActionType, PlayerActionKind};
use crate::engine::pot::{Outcome, Payout, Pot};
use crate::engine::side_pots::peel_side_pots;
use crate::engine::validation::{check_action, valid_actions, Rejection};

/// Учёт фишек матча: текущий банк, сайд-поты, олл-ины улицы, архив раздач.
///
/// Все перемещения фишек между стеками и банками идут только через Pool.
#[derive(Debug, Default)]
pub struct Pool {
    /// Банки раздачи; последний – текущий, в него идут новые ставки.
    pots: Vec<Pot>,
    /// Кто ушёл в олл-ин на текущей улице.
    all_in: Vec<PlayerId>,
    /// Текущая ставка улицы.
    bet: Chips,
    outcomes: Vec<Outcome>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bet(&self) -> Chips {
        self.bet
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// Текущий банк.
    pub fn pot(&self) -> Option<&Pot> {
        self.pots.last()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Сумма всех открытых банков.
    pub fn total(&self) -> Chips {
        self.pots.iter().map(|p| p.amount).sum()
    }

    /// Открыть новый текущий банк. Пустой текущий банк при этом выбрасывается.
    pub fn create_pot(&mut self, participants: Vec<PlayerId>, amount: Chips) {
        if self.pots.last().map_or(false, |p| p.amount.is_zero()) {
            self.pots.pop();
        }
        self.pots.push(Pot::new(participants, amount));
    }

    /// Довести ставку игрока на улице до `level`: списать разницу со стека
    /// в текущий банк. Возвращает итоговый уровень.
    pub fn calculate_chips(&mut self, player: &mut Player, level: Chips) -> Chips {
        let increase = level.saturating_sub(player.wager());

        player.set_chips(player.chips() - increase);

        if self.pots.is_empty() {
            self.pots.push(Pot::new(Vec::new(), Chips::ZERO));
        }
        if let Some(pot) = self.pots.last_mut() {
            pot.add(increase);
        }

        if player.chips().is_zero() && !self.all_in.contains(&player.id()) {
            self.all_in.push(player.id());
        }

        level
    }

    /// Применить действие к банку. Возвращает запись, которую Round сохранит игроку.
    pub fn update(&mut self, player: &mut Player, action: &PlayerActionKind) -> ActionRecord {
        let wager = player.wager();

        match action {
            PlayerActionKind::Fold => {
                for pot in self.pots.iter_mut() {
                    pot.remove(player.id());
                }
                ActionRecord::new(ActionType::Fold, wager)
            }
            PlayerActionKind::Check => ActionRecord::new(ActionType::Check, wager),
            PlayerActionKind::Call => {
                // Коротким стеком call превращается в олл-ин на меньшую сумму.
                let level = self.bet.min(wager + player.chips());
                let level = self.calculate_chips(player, level);
                ActionRecord::new(ActionType::Call, level)
            }
            PlayerActionKind::Bet(amount) | PlayerActionKind::Raise(amount) => {
                let level = self.calculate_chips(player, *amount);
                self.bet = self.bet.max(level);
                ActionRecord::new(action.action_type(), level)
            }
        }
    }

    /// Шлюз легальности действия (с причиной отказа).
    pub fn check(
        &self,
        player: &Player,
        action: &PlayerActionKind,
        action_map: &HashMap<PlayerId, ActionRecord>,
    ) -> Result<(), Rejection> {
        check_action(player, action, action_map, self.bet)
    }

    pub fn validate(
        &self,
        player: &Player,
        action: &PlayerActionKind,
        action_map: &HashMap<PlayerId, ActionRecord>,
    ) -> bool {
        self.check(player, action, action_map).is_ok()
    }

    pub fn valid_actions(&self, player: &Player, action_map: &HashMap<PlayerId, ActionRecord>) -> Vec<ActionType> {
        valid_actions(player, action_map, self.bet)
    }

    /// Сброс счётчиков улицы.
    pub fn play_round(&mut self) {
        self.bet = Chips::ZERO;
        self.all_in.clear();
    }

    /// Конец улицы: отделить сайд-поты для всех олл-инов этой улицы.
    pub fn end_round(&mut self, players: &[Player]) {
        let Some(contenders) = self.pots.last().map(|p| p.participants.clone()) else {
            return;
        };

        let all_in: Vec<(PlayerId, Chips)> = self
            .all_in
            .iter()
            .filter_map(|id| players.iter().find(|p| p.id() == *id))
            .map(|p| (p.id(), p.wager()))
            .collect();

        let contributions: Vec<(PlayerId, Chips)> =
            players.iter().map(|p| (p.id(), p.wager())).collect();

        let side_pots = peel_side_pots(&all_in, &contributions, self.bet, &contenders);
        if side_pots.is_empty() {
            return;
        }

        let set_aside: Chips = side_pots.iter().map(|p| p.amount).sum();
        if let Some(main) = self.pots.last_mut() {
            main.amount -= set_aside;
        }

        // Уменьшенный банк остаётся в списке даже пустым; заменяется только
        // пустой слой, отделённый здесь же.
        let mut peeled = false;
        for side_pot in side_pots {
            debug!(
                "сайд-пот {} для игроков {:?}",
                side_pot.amount, side_pot.eligible
            );
            if peeled && self.pots.last().map_or(false, |p| p.amount.is_zero()) {
                self.pots.pop();
            }
            self.pots.push(Pot::new(side_pot.eligible, side_pot.amount));
            peeled = true;
        }
    }

    /// Конец раздачи: рассчитать все банки, выплатить победителям, сохранить итог.
    ///
    /// Каждый банк получают объявленные победители, которые за него ещё борются;
    /// если таких нет, банк делят оставшиеся претенденты этого банка.
    /// Банк, из которого все претенденты сбросили карты, уходит победителям
    /// раздачи, а без них – всем, кто остался в раздаче.
    pub fn end_hand(&mut self, status: &HandStatus, players: &mut [Player]) {
        let mut payouts = Vec::new();
        let mut pots = std::mem::take(&mut self.pots);

        for pot in pots.iter_mut() {
            let winners = Self::pot_winners(pot, status, players);

            pot.status = Some(HandStatus {
                completed: status.completed,
                winners,
            });

            if pot.amount.is_zero() {
                continue;
            }

            let paid = Self::calculate_outcome(pot, players);
            if paid.is_empty() {
                warn!("банк {} некому выплатить", pot.amount);
            }
            payouts.extend(paid);
        }

        self.outcomes.push(Outcome {
            status: status.clone(),
            pots,
            payouts,
        });
        self.all_in.clear();
        self.bet = Chips::ZERO;
    }

    fn pot_winners(pot: &Pot, status: &HandStatus, players: &[Player]) -> Vec<PlayerId> {
        let declared: Vec<PlayerId> = status
            .winners
            .iter()
            .copied()
            .filter(|w| pot.contains(*w))
            .collect();
        if !declared.is_empty() {
            return declared;
        }
        if !pot.participants.is_empty() {
            return pot.participants.clone();
        }

        debug!("банк {} без претендентов", pot.amount);
        if !status.winners.is_empty() {
            return status.winners.clone();
        }
        players
            .iter()
            .filter(|p| !p.is_folded())
            .map(|p| p.id())
            .collect()
    }

    /// Выплатить банк его победителям.
    ///
    /// При нескольких победителях все, кроме последнего, получают
    /// `floor(amount / n)`, последний – остаток.
    pub fn calculate_outcome(pot: &Pot, players: &mut [Player]) -> Vec<Payout> {
        let winners = match &pot.status {
            Some(status) if !status.winners.is_empty() => &status.winners,
            _ => return Vec::new(),
        };

        let (share, last_share) = pot.amount.split(winners.len());
        let last_index = winners.len() - 1;

        let mut payouts = Vec::with_capacity(winners.len());
        for (i, winner_id) in winners.iter().enumerate() {
            let amount = if i == last_index { last_share } else { share };
            match players.iter_mut().find(|p| p.id() == *winner_id) {
                Some(winner) => {
                    winner.set_chips(winner.chips() + amount);
                    payouts.push(Payout {
                        player_id: *winner_id,
                        amount,
                    });
                }
                None => warn!("победитель {} не найден за столом", winner_id),
            }
        }

        payouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::events::Emitter;

    fn players(chips: &[u64]) -> Vec<Player> {
        let events = Emitter::new();
        chips
            .iter()
            .enumerate()
            .map(|(i, c)| Player::new(i as PlayerId + 1, format!("p{}", i + 1), Chips(*c), events.clone()))
            .collect()
    }

    fn settled(amount: u64, winners: Vec<PlayerId>) -> Pot {
        let mut pot = Pot::new(winners.clone(), Chips(amount));
        pot.status = Some(HandStatus::won_by(winners));
        pot
    }

    #[test]
    fn split_gives_remainder_to_last_winner() {
        let mut ps = players(&[0, 0, 0]);
        let payouts = Pool::calculate_outcome(&settled(11, vec![1, 2, 3]), &mut ps);

        let amounts: Vec<u64> = payouts.iter().map(|p| p.amount.0).collect();
        assert_eq!(amounts, vec![3, 3, 5]);
        assert_eq!(ps.iter().map(|p| p.chips().0).sum::<u64>(), 11);
    }

    #[test]
    fn split_shares_sum_to_pot_for_many_sizes() {
        for amount in [1u64, 2, 7, 100, 1001, 99_999] {
            for n in 2..=7usize {
                let mut ps = players(&vec![0; n]);
                let winners: Vec<PlayerId> = (1..=n as PlayerId).collect();
                let payouts = Pool::calculate_outcome(&settled(amount, winners), &mut ps);

                let floor = amount / n as u64;
                let total: u64 = payouts.iter().map(|p| p.amount.0).sum();
                assert_eq!(total, amount);
                assert!(payouts[..n - 1].iter().all(|p| p.amount.0 == floor));
                assert_eq!(payouts[n - 1].amount.0, amount - (n as u64 - 1) * floor);
            }
        }
    }

    #[test]
    fn single_winner_takes_everything() {
        let mut ps = players(&[10, 10]);
        Pool::calculate_outcome(&settled(40, vec![2]), &mut ps);
        assert_eq!(ps[1].chips(), Chips(50));
        assert_eq!(ps[0].chips(), Chips(10));
    }

    #[test]
    fn empty_current_pot_is_discarded_on_create() {
        let mut pool = Pool::new();
        pool.create_pot(vec![1, 2], Chips::ZERO);
        pool.create_pot(vec![1, 2, 3], Chips(30));
        assert_eq!(pool.pots().len(), 1);
        pool.create_pot(vec![2, 3], Chips::ZERO);
        assert_eq!(pool.pots().len(), 2);
        assert_eq!(pool.total(), Chips(30));
    }

    #[test]
    fn call_is_capped_by_stack_and_marks_all_in() {
        let mut ps = players(&[1000, 40]);
        let mut pool = Pool::new();
        pool.create_pot(vec![1, 2], Chips::ZERO);

        let bet = pool.update(&mut ps[0], &PlayerActionKind::Bet(Chips(100)));
        assert_eq!(bet.wager, Chips(100));
        assert_eq!(pool.bet(), Chips(100));

        let call = pool.update(&mut ps[1], &PlayerActionKind::Call);
        assert_eq!(call.wager, Chips(40));
        assert_eq!(ps[1].chips(), Chips::ZERO);
        assert_eq!(pool.total(), Chips(140));
    }
}
