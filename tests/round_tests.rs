//! Round: блайнды, очередь ходов, шлюз легальности и закрытие улицы.
//!
//! Стол из трёх игроков по 1000 фишек, малый блайнд = 1, дилер на месте 1:
//! малый блайнд – место 2, большой – место 0, первым ходит место 1.

use chipchip_engine::domain::{Chips, HandStatus, Player, PlayerId, SeatIndex, Street, Table};
use chipchip_engine::engine::actions::{ActionType, PlayerAction, PlayerActionKind};
use chipchip_engine::engine::events::{Emitter, EventKind, RoundEvent};
use chipchip_engine::engine::{Event, Round};
use tokio::sync::mpsc::UnboundedReceiver;

/// Утилита: стол, подготовленный к раздаче (как это делает Hand::start).
fn round_setup(position: SeatIndex) -> (Table, UnboundedReceiver<Event>) {
    let events = Emitter::new();
    let rx = events.subscribe();
    let players: Vec<Player> = (1..=3)
        .map(|id| Player::new(id, format!("player{id}"), Chips(1000), events.clone()))
        .collect();

    let mut table = Table::new(players, Chips(1), position, events).expect("стол");
    for p in table.players.iter_mut() {
        p.set_joined(true);
    }
    table.pool.create_pot(vec![1, 2, 3], Chips::ZERO);
    (table, rx)
}

fn act(round: &mut Round, table: &mut Table, id: PlayerId, kind: PlayerActionKind) -> Option<HandStatus> {
    round.handle(table, &PlayerAction::new(id, kind))
}

fn chips(table: &Table) -> Vec<u64> {
    table.players.iter().map(|p| p.chips().0).collect()
}

//
// ====================== ПРЕФЛОП ======================
//

#[test]
fn preflop_posts_blinds_and_gives_big_blind_the_option() {
    let (mut table, _rx) = round_setup(1);
    let round = Round::play(Street::Preflop, &mut table);

    assert_eq!(chips(&table), vec![998, 1000, 999]);
    assert!(table.players[0].is_optioned(), "большой блайнд должен получить право хода");
    assert!(table.players[0].is_bettor());
    assert_eq!(table.pool.total(), Chips(3));
    assert_eq!(table.pool.bet(), Chips(2));

    assert_eq!(round.order(), &[1, 2, 0]);
    assert_eq!(round.monitored(), Some(1));
    assert!(!round.is_closed());
    assert_eq!(
        table.players[1].valid_actions(),
        &[ActionType::Call, ActionType::Raise, ActionType::Fold]
    );
}

#[test]
fn monitored_event_is_published_for_first_player() {
    let (mut table, mut rx) = round_setup(1);
    let _round = Round::play(Street::Preflop, &mut table);

    let mut monitored = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let EventKind::Round(RoundEvent::Monitored { player, .. }) = event.kind {
            monitored.push(player.id);
        }
    }
    assert_eq!(monitored, vec![2]);
}

#[test]
fn illegal_check_and_bet_from_first_player_are_dropped() {
    let (mut table, _rx) = round_setup(1);
    let mut round = Round::play(Street::Preflop, &mut table);

    assert_eq!(act(&mut round, &mut table, 2, PlayerActionKind::Check), None);
    assert_eq!(act(&mut round, &mut table, 2, PlayerActionKind::Bet(Chips(10))), None);

    assert_eq!(table.players[1].chips(), Chips(1000));
    assert_eq!(round.monitored(), Some(1), "ход остаётся у того же игрока");
    assert!(round.action_map().get(&2).is_none());
}

#[test]
fn action_out_of_turn_is_dropped() {
    let (mut table, _rx) = round_setup(1);
    let mut round = Round::play(Street::Preflop, &mut table);

    act(&mut round, &mut table, 1, PlayerActionKind::Call);
    act(&mut round, &mut table, 99, PlayerActionKind::Fold);

    assert_eq!(chips(&table), vec![998, 1000, 999]);
    assert_eq!(round.monitored(), Some(1));
}

#[test]
fn raise_moves_chips_and_passes_turn() {
    let (mut table, _rx) = round_setup(1);
    let mut round = Round::play(Street::Preflop, &mut table);

    act(&mut round, &mut table, 2, PlayerActionKind::Raise(Chips(10)));

    assert_eq!(table.players[1].chips(), Chips(990));
    assert!(table.players[1].is_bettor());
    assert!(!table.players[0].is_optioned(), "рейз снимает право большого блайнда");
    assert_eq!(round.monitored(), Some(2));
}

#[test]
fn big_blind_check_closes_limped_preflop() {
    let (mut table, _rx) = round_setup(1);
    let mut round = Round::play(Street::Preflop, &mut table);

    assert_eq!(act(&mut round, &mut table, 2, PlayerActionKind::Call), None);
    assert_eq!(act(&mut round, &mut table, 3, PlayerActionKind::Call), None);
    assert_eq!(round.monitored(), Some(0));

    let status = act(&mut round, &mut table, 1, PlayerActionKind::Check);
    assert_eq!(status, Some(HandStatus::street_closed()));
    assert!(round.is_closed());
    assert_eq!(round.monitored(), None);
    assert_eq!(chips(&table), vec![998, 998, 998]);
    assert_eq!(table.pool.total(), Chips(6));
}

//
// ====================== ФЛОП ======================
//

#[test]
fn check_check_fold_terminates_street() {
    let (mut table, _rx) = round_setup(1);
    let mut round = Round::play(Street::Flop, &mut table);

    assert_eq!(round.order(), &[2, 0, 1]);
    assert_eq!(round.monitored(), Some(2));

    assert_eq!(act(&mut round, &mut table, 3, PlayerActionKind::Check), None);
    assert_eq!(act(&mut round, &mut table, 1, PlayerActionKind::Check), None);
    let status = act(&mut round, &mut table, 2, PlayerActionKind::Fold);

    assert_eq!(status, Some(HandStatus::street_closed()));
    assert!(table.players[1].is_folded());
}

#[test]
fn two_folds_leave_single_winner() {
    let (mut table, _rx) = round_setup(1);
    let mut round = Round::play(Street::Flop, &mut table);

    act(&mut round, &mut table, 3, PlayerActionKind::Bet(Chips(10)));
    assert_eq!(act(&mut round, &mut table, 1, PlayerActionKind::Fold), None);
    let status = act(&mut round, &mut table, 2, PlayerActionKind::Fold);

    assert_eq!(status, Some(HandStatus::won_by(vec![3])));
}

#[test]
fn check_facing_bet_is_dropped_call_is_accepted() {
    let (mut table, _rx) = round_setup(1);
    let mut round = Round::play(Street::Flop, &mut table);

    act(&mut round, &mut table, 3, PlayerActionKind::Bet(Chips(10)));
    act(&mut round, &mut table, 1, PlayerActionKind::Check);
    assert_eq!(round.monitored(), Some(0));

    act(&mut round, &mut table, 1, PlayerActionKind::Call);
    assert_eq!(table.players[0].chips(), Chips(990));
    assert_eq!(round.monitored(), Some(1));
}

#[test]
fn bet_call_call_closes_on_player_before_bettor() {
    let (mut table, _rx) = round_setup(1);
    let mut round = Round::play(Street::Flop, &mut table);

    act(&mut round, &mut table, 3, PlayerActionKind::Bet(Chips(10)));
    assert_eq!(act(&mut round, &mut table, 1, PlayerActionKind::Call), None);
    let status = act(&mut round, &mut table, 2, PlayerActionKind::Call);

    assert_eq!(status, Some(HandStatus::street_closed()));
    assert_eq!(table.pool.total(), Chips(30));
}

#[test]
fn street_with_single_active_player_closes_immediately() {
    let (mut table, _rx) = round_setup(1);
    table.players[0].set_folded(true);
    table.players[1].set_allin(true);

    let round = Round::play(Street::Turn, &mut table);

    assert!(round.is_closed());
    assert_eq!(round.status(), Some(&HandStatus::street_closed()));
    assert_eq!(round.monitored(), None);
}
