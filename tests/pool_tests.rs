//! Pool: легальность действий, движение фишек, сайд-поты и расчёт раздачи.

use std::collections::HashMap;

use chipchip_engine::domain::{Chips, HandStatus, Player, PlayerId};
use chipchip_engine::engine::actions::{ActionRecord, PlayerActionKind};
use chipchip_engine::engine::events::Emitter;
use chipchip_engine::engine::Pool;

/// Утилита: игроки с id 1..=n и заданными стеками.
fn players(chips: &[u64]) -> Vec<Player> {
    let events = Emitter::new();
    chips
        .iter()
        .enumerate()
        .map(|(i, c)| Player::new(i as PlayerId + 1, format!("player{}", i + 1), Chips(*c), events.clone()))
        .collect()
}

/// Утилита: применить действие так же, как это делает Round.
fn act(
    pool: &mut Pool,
    player: &mut Player,
    kind: PlayerActionKind,
    map: &mut HashMap<PlayerId, ActionRecord>,
) -> ActionRecord {
    let record = pool.update(player, &kind);
    player.set_action(Some(record));
    map.insert(player.id(), record);
    record
}

fn total(players: &[Player], pool: &Pool) -> u64 {
    players.iter().map(|p| p.chips().0).sum::<u64>() + pool.total().0
}

//
// ====================== ЛЕГАЛЬНОСТЬ ======================
//

#[test]
fn optioned_big_blind_may_only_raise_check_or_fold() {
    let mut ps = players(&[1000, 1000, 1000]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1, 2, 3], Chips::ZERO);
    let mut map = HashMap::new();

    act(&mut pool, &mut ps[0], PlayerActionKind::Bet(Chips(1)), &mut map);
    act(&mut pool, &mut ps[1], PlayerActionKind::Bet(Chips(2)), &mut map);
    ps[1].set_optioned(true);

    assert!(pool.validate(&ps[1], &PlayerActionKind::Check, &map));
    assert!(pool.validate(&ps[1], &PlayerActionKind::Raise(Chips(4)), &map));
    assert!(!pool.validate(&ps[1], &PlayerActionKind::Raise(Chips(2)), &map));
    assert!(!pool.validate(&ps[1], &PlayerActionKind::Call, &map));
    assert!(!pool.validate(&ps[1], &PlayerActionKind::Bet(Chips(4)), &map));
}

#[test]
fn open_bet_allows_only_call_raise_fold() {
    let mut ps = players(&[1000, 1000, 1000]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1, 2, 3], Chips::ZERO);
    let mut map = HashMap::new();

    act(&mut pool, &mut ps[0], PlayerActionKind::Bet(Chips(50)), &mut map);

    let p = &ps[2];
    assert!(pool.validate(p, &PlayerActionKind::Call, &map));
    assert!(pool.validate(p, &PlayerActionKind::Fold, &map));
    assert!(pool.validate(p, &PlayerActionKind::Raise(Chips(100)), &map));
    assert!(!pool.validate(p, &PlayerActionKind::Check, &map));
    assert!(!pool.validate(p, &PlayerActionKind::Bet(Chips(100)), &map));
    // Больше, чем есть у игрока.
    assert!(!pool.validate(p, &PlayerActionKind::Raise(Chips(1001)), &map));
}

#[test]
fn no_bet_allows_only_check_bet_fold() {
    let ps = players(&[1000, 1000]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1, 2], Chips::ZERO);
    let map = HashMap::new();

    let p = &ps[0];
    assert!(pool.validate(p, &PlayerActionKind::Check, &map));
    assert!(pool.validate(p, &PlayerActionKind::Bet(Chips(5)), &map));
    assert!(pool.validate(p, &PlayerActionKind::Bet(Chips(1000)), &map));
    assert!(!pool.validate(p, &PlayerActionKind::Bet(Chips::ZERO), &map));
    assert!(!pool.validate(p, &PlayerActionKind::Call, &map));
    assert!(!pool.validate(p, &PlayerActionKind::Raise(Chips(5)), &map));
}

#[test]
fn valid_actions_hint_matches_gate() {
    let mut ps = players(&[1000, 1000, 1000]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1, 2, 3], Chips::ZERO);
    let mut map = HashMap::new();

    use chipchip_engine::engine::ActionType::*;
    assert_eq!(pool.valid_actions(&ps[2], &map), vec![Check, Bet, Fold]);

    act(&mut pool, &mut ps[0], PlayerActionKind::Bet(Chips(50)), &mut map);
    assert_eq!(pool.valid_actions(&ps[2], &map), vec![Call, Raise, Fold]);
}

//
// ====================== ДВИЖЕНИЕ ФИШЕК ======================
//

#[test]
fn raise_only_moves_the_difference() {
    let mut ps = players(&[1000, 1000]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1, 2], Chips::ZERO);
    let mut map = HashMap::new();

    act(&mut pool, &mut ps[0], PlayerActionKind::Bet(Chips(10)), &mut map);
    act(&mut pool, &mut ps[1], PlayerActionKind::Raise(Chips(30)), &mut map);
    act(&mut pool, &mut ps[0], PlayerActionKind::Call, &mut map);

    assert_eq!(ps[0].chips(), Chips(970));
    assert_eq!(ps[1].chips(), Chips(970));
    assert_eq!(pool.bet(), Chips(30));
    assert_eq!(pool.total(), Chips(60));
    assert_eq!(total(&ps, &pool), 2000);
}

#[test]
fn fold_removes_player_from_every_pot() {
    let mut ps = players(&[1000, 1000, 1000]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1, 2, 3], Chips(30));
    pool.create_pot(vec![2, 3], Chips(20));
    let mut map = HashMap::new();

    act(&mut pool, &mut ps[1], PlayerActionKind::Fold, &mut map);

    assert!(pool.pots().iter().all(|p| !p.contains(2)));
    assert_eq!(pool.pots()[0].participants, vec![1, 3]);
    assert_eq!(pool.pots()[1].participants, vec![3]);
}

//
// ====================== САЙД-ПОТЫ И РАСЧЁТ ======================
//

/// 1000 / 1000 / 50: короткий стек коллирует олл-ином.
fn short_stack_street() -> (Vec<Player>, Pool) {
    let mut ps = players(&[1000, 1000, 50]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1, 2, 3], Chips::ZERO);
    let mut map = HashMap::new();

    act(&mut pool, &mut ps[0], PlayerActionKind::Bet(Chips(100)), &mut map);
    let short = act(&mut pool, &mut ps[2], PlayerActionKind::Call, &mut map);
    assert_eq!(short.wager, Chips(50));
    act(&mut pool, &mut ps[1], PlayerActionKind::Call, &mut map);

    pool.end_round(&ps);
    (ps, pool)
}

#[test]
fn all_in_for_less_creates_one_side_pot_without_that_player() {
    let (ps, pool) = short_stack_street();

    assert_eq!(pool.pots().len(), 2);
    let main = &pool.pots()[0];
    let side = &pool.pots()[1];

    assert_eq!(main.amount, Chips(150));
    assert_eq!(main.participants, vec![1, 2, 3]);
    // (100 − 50) × 2 коллера.
    assert_eq!(side.amount, Chips(100));
    assert_eq!(side.participants, vec![1, 2]);
    assert_eq!(total(&ps, &pool), 2050);
}

#[test]
fn end_hand_settles_every_pot_and_archives_outcome() {
    let (mut ps, mut pool) = short_stack_street();

    pool.end_hand(&HandStatus::won_by(vec![3]), &mut ps);

    // Основной банк – короткому стеку, сайд-пот делят те, кто за него боролся.
    assert_eq!(ps[2].chips(), Chips(150));
    assert_eq!(ps[0].chips(), Chips(950));
    assert_eq!(ps[1].chips(), Chips(950));

    assert!(pool.pots().is_empty());
    assert_eq!(pool.total(), Chips::ZERO);
    assert_eq!(total(&ps, &pool), 2050);

    let outcome = pool.outcomes().last().expect("итог раздачи");
    assert_eq!(outcome.status.winners, vec![3]);
    assert_eq!(outcome.paid_to(3), Chips(150));
    assert_eq!(outcome.paid_to(1), Chips(50));
    assert_eq!(outcome.pots.len(), 2);
    assert_eq!(
        outcome.pots[1].status.as_ref().map(|s| s.winners.clone()),
        Some(vec![1, 2])
    );
}

#[test]
fn split_pot_remainder_goes_to_last_winner() {
    let mut ps = players(&[0, 0, 0]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1, 2, 3], Chips(100));

    pool.end_hand(&HandStatus::won_by(vec![1, 2, 3]), &mut ps);

    let chips: Vec<u64> = ps.iter().map(|p| p.chips().0).collect();
    assert_eq!(chips, vec![33, 33, 34]);
}

#[test]
fn pot_without_participants_goes_to_hand_winners() {
    let mut ps = players(&[0, 500, 500]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1], Chips(300));
    // Оба претендента сайд-пота сбросили карты.
    pool.create_pot(Vec::new(), Chips(100));

    pool.end_hand(&HandStatus::won_by(vec![1]), &mut ps);

    assert_eq!(ps[0].chips(), Chips(400));
    assert_eq!(total(&ps, &pool), 1400);
    let outcome = pool.outcomes().last().expect("итог раздачи");
    assert_eq!(outcome.paid_to(1), Chips(400));
}

#[test]
fn reduced_main_pot_is_kept_after_side_pot_peel() {
    // Блайнды олл-ин на 2 и 10, первый игрок ещё не отвечал.
    let mut ps = players(&[1000, 2, 10]);
    let mut pool = Pool::new();
    pool.create_pot(vec![1, 2, 3], Chips::ZERO);
    let mut map = HashMap::new();

    act(&mut pool, &mut ps[1], PlayerActionKind::Bet(Chips(2)), &mut map);
    act(&mut pool, &mut ps[2], PlayerActionKind::Bet(Chips(10)), &mut map);
    pool.end_round(&ps);

    let pots: Vec<(u64, Vec<PlayerId>)> = pool
        .pots()
        .iter()
        .map(|p| (p.amount.0, p.participants.clone()))
        .collect();
    assert_eq!(pots, vec![(4, vec![1, 2, 3]), (8, vec![1, 3]), (0, vec![1])]);
    assert_eq!(total(&ps, &pool), 1012);
}
