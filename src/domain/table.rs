use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::{PlayerId, SeatIndex};
use crate::engine::errors::EngineError;
use crate::engine::events::Emitter;
use crate::engine::pool::Pool;

/// Стол матча: игроки по местам, банк, размер ставки и позиция дилера.
///
/// Стол живёт столько же, сколько матч; Hand / Round / Showdown получают
/// его по `&mut` на время обработки одного действия.
#[derive(Debug)]
pub struct Table {
    /// Места за столом: индекс вектора = SeatIndex.
    pub players: Vec<Player>,
    pub pool: Pool,
    /// Малый блайнд (большой = 2 × wager).
    pub wager: Chips,
    /// Индекс дилерской кнопки.
    pub dealer: SeatIndex,
    pub events: Emitter,
}

impl Table {
    pub fn new(
        players: Vec<Player>,
        wager: Chips,
        dealer: SeatIndex,
        events: Emitter,
    ) -> Result<Self, EngineError> {
        if players.len() < 2 {
            return Err(EngineError::NotEnoughPlayers(players.len()));
        }
        if wager.is_zero() {
            return Err(EngineError::ZeroWager);
        }
        if dealer >= players.len() {
            return Err(EngineError::InvalidSeat(dealer));
        }

        Ok(Self {
            players,
            pool: Pool::new(),
            wager,
            dealer,
            events,
        })
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    /// Сколько игроков ещё с фишками.
    pub fn funded_count(&self) -> usize {
        self.players.iter().filter(|p| !p.chips().is_zero()).count()
    }

    /// Все фишки стола: стеки + банки. Не меняется внутри раздачи.
    pub fn total_chips(&self) -> Chips {
        self.players.iter().map(|p| p.chips()).sum::<Chips>() + self.pool.total()
    }
}
