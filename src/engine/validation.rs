use std::collections::HashMap;

use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::PlayerId;
use crate::engine::actions::{ActionRecord, ActionType, PlayerActionKind};

/// Почему действие было отброшено. Наружу не уходит, только в лог.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("действие {0:?} сейчас недоступно")]
    NotAllowed(ActionType),

    #[error("check невозможен – ставка игрока {wager} ниже текущей {bet}")]
    CannotCheck { wager: Chips, bet: Chips },

    #[error("raise {amount} должен превышать текущую ставку {bet}")]
    RaiseTooSmall { amount: Chips, bet: Chips },

    #[error("bet {amount} меньше текущей ставки {bet} или нулевой")]
    BetTooSmall { amount: Chips, bet: Chips },

    #[error("недостаточно фишек: нужно {amount}, есть {available}")]
    NotEnoughChips { amount: Chips, available: Chips },
}

/// Какие типы действий вообще допустимы для игрока на этой улице.
///
/// - право большого блайнда: raise / check / fold;
/// - на улице уже был bet/raise: call / raise / fold;
/// - иначе: check / bet / fold.
pub fn allowed_action_types(
    player: &Player,
    action_map: &HashMap<PlayerId, ActionRecord>,
) -> &'static [ActionType] {
    if player.is_optioned() {
        &[ActionType::Raise, ActionType::Check, ActionType::Fold]
    } else if action_map.values().any(ActionRecord::is_aggressive) {
        &[ActionType::Call, ActionType::Raise, ActionType::Fold]
    } else {
        &[ActionType::Check, ActionType::Bet, ActionType::Fold]
    }
}

/// Проверка, может ли игрок выполнить это действие при текущей ставке улицы.
pub fn check_action(
    player: &Player,
    action: &PlayerActionKind,
    action_map: &HashMap<PlayerId, ActionRecord>,
    bet: Chips,
) -> Result<(), Rejection> {
    let kind = action.action_type();
    if !allowed_action_types(player, action_map).contains(&kind) {
        return Err(Rejection::NotAllowed(kind));
    }

    let wager = player.wager();

    match action {
        PlayerActionKind::Check => {
            if wager < bet {
                return Err(Rejection::CannotCheck { wager, bet });
            }
        }
        PlayerActionKind::Raise(amount) => {
            if *amount <= bet {
                return Err(Rejection::RaiseTooSmall { amount: *amount, bet });
            }
        }
        PlayerActionKind::Bet(amount) => {
            if amount.is_zero() || *amount < bet {
                return Err(Rejection::BetTooSmall { amount: *amount, bet });
            }
        }
        PlayerActionKind::Fold | PlayerActionKind::Call => {}
    }

    // Нельзя поставить больше, чем есть: стек + уже поставленное на улице.
    let available = wager + player.chips();
    match action.amount() {
        Some(amount) if amount > available => Err(Rejection::NotEnoughChips { amount, available }),
        _ => Ok(()),
    }
}

/// Подсказка для клиента: какие действия сейчас имеют смысл.
pub fn valid_actions(
    player: &Player,
    action_map: &HashMap<PlayerId, ActionRecord>,
    bet: Chips,
) -> Vec<ActionType> {
    let wager = player.wager();
    let available = wager + player.chips();

    allowed_action_types(player, action_map)
        .iter()
        .copied()
        .filter(|kind| match kind {
            ActionType::Check => wager >= bet,
            ActionType::Raise => available > bet,
            ActionType::Bet => !available.is_zero() && available >= bet,
            ActionType::Call => !player.chips().is_zero(),
            ActionType::Fold => true,
        })
        .collect()
}
