/// Источник случайности для движка: пока нужен только для выбора
/// первой позиции дилера.
pub trait RandomSource {
    /// Случайный индекс в диапазоне `0..upper` (`upper > 0`).
    fn index(&mut self, upper: usize) -> usize;
}

//
// NATIVE ВАРИАНТ (НЕ wasm32): rand.
//
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for SystemRng {
    fn index(&mut self, upper: usize) -> usize {
        use rand::Rng;

        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed даёт одинаковые позиции дилера.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

#[cfg(not(target_arch = "wasm32"))]
impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for DeterministicRng {
    fn index(&mut self, upper: usize) -> usize {
        use rand::Rng;

        if upper == 0 {
            return 0;
        }
        self.inner.gen_range(0..upper)
    }
}

//
// WASM ВАРИАНТ (Linera контракт): без rand / getrandom.
//
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(target_arch = "wasm32")]
impl RandomSource for SystemRng {
    fn index(&mut self, _upper: usize) -> usize {
        // Контракт детерминированный: дилер всегда с нулевого места.
        0
    }
}

/// Всегда одна и та же позиция (по модулю `upper`).
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedRng(pub usize);

impl RandomSource for FixedRng {
    fn index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            0
        } else {
            self.0 % upper
        }
    }
}
