use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, PlayerId};

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible: Vec<PlayerId>,
}

/// Отделить сайд-поты по итогам улицы.
///
/// Вход:
/// - `all_in` – (игрок, его ставка на улице) для всех, кто ушёл в олл-ин на этой улице;
/// - `contributions` – (игрок, сколько он внёс на этой улице) для всех игроков,
///   включая сбросивших карты;
/// - `bet` – итоговая ставка улицы;
/// - `contenders` – претенденты текущего банка.
///
/// Для каждого олл-ина (по возрастанию ставки) отделяем слой между его ставкой
/// и следующим уровнем: каждый игрок кладёт в слой только то, что реально
/// внёс выше ставки олл-ина. Сам игрок из следующих слоёв выбывает.
/// Выход идёт "от младших" к "старшим", сумма слоёв вычитается из текущего
/// банка вызывающим кодом и никогда не превышает внесённого на улице.
pub fn peel_side_pots(
    all_in: &[(PlayerId, Chips)],
    contributions: &[(PlayerId, Chips)],
    bet: Chips,
    contenders: &[PlayerId],
) -> Vec<SidePot> {
    if all_in.is_empty() {
        return Vec::new();
    }

    let mut entries: Vec<(PlayerId, Chips)> = all_in.to_vec();
    entries.sort_by_key(|(_, wager)| *wager);

    // Уровни ставок: все олл-ины + итоговая ставка, без повторов.
    let mut levels: Vec<Chips> = entries.iter().map(|(_, w)| *w).collect();
    levels.push(bet);
    levels.sort();
    levels.dedup();

    let mut eligible: Vec<PlayerId> = contenders.to_vec();
    let mut pots = Vec::with_capacity(entries.len());

    for (player_id, wager) in entries {
        let next_level = levels
            .iter()
            .copied()
            .find(|level| *level > wager)
            .unwrap_or_else(|| levels[levels.len() - 1]);

        eligible.retain(|p| *p != player_id);

        let amount: Chips = contributions
            .iter()
            .map(|(_, c)| (*c).min(next_level) - (*c).min(wager))
            .sum();

        pots.push(SidePot {
            amount,
            eligible: eligible.clone(),
        });
    }

    pots
}
