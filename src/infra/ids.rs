use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{CroupierId, PlayerId};

/// Простая генерация ID на основе монотонных счётчиков.
/// Это удобно для локальных тестов и dev CLI.
///
/// В Linera-контракте ID приходят из внешнего контекста
/// (клиент сам передаёт id участника и крупье).
#[derive(Debug)]
pub struct IdGenerator {
    croupier_counter: AtomicU64,
    player_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            croupier_counter: AtomicU64::new(1),
            player_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_croupier_id(&self) -> CroupierId {
        self.croupier_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
