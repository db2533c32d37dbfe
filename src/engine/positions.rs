use crate::domain::player::Player;
use crate::domain::{SeatIndex, Street};

/// Найти следующее место после `from` (по кругу), где игрок участвует
/// в раздаче и не сбросил карты. Само `from` проверяется последним.
pub fn next_joined_seat(players: &[Player], from: SeatIndex) -> Option<SeatIndex> {
    let n = players.len();
    if n == 0 {
        return None;
    }

    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&seat| players[seat].is_joined() && !players[seat].is_folded())
}

/// Порядок ходов на улице: все места по кругу, начиная с первого ходящего.
///
/// Префлоп начинается через три места от дилера (после блайндов),
/// остальные улицы – со следующего места после дилера.
pub fn phase_order(n: usize, dealer: SeatIndex, street: Street) -> Vec<SeatIndex> {
    if n == 0 {
        return Vec::new();
    }
    let start = dealer + street.first_to_act_offset();
    (0..n).map(|i| (start + i) % n).collect()
}

/// Места малого и большого блайндов для текущего дилера.
pub fn blind_seats(players: &[Player], dealer: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let small = next_joined_seat(players, dealer)?;
    let big = next_joined_seat(players, small)?;
    Some((small, big))
}
