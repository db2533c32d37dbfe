//! Инфраструктура: RNG для выбора дилера, генерация ID, конфиг крупье.
//!
//! Эти тесты проверяют:
//! - детерминированность DeterministicRng
//! - диапазон индексов у всех RandomSource
//! - монотонность IdGenerator
//! - разбор CroupierConfig из JSON

use chipchip_engine::config::{ConfigError, CroupierConfig, DEFAULT_CHIPS};
use chipchip_engine::domain::Chips;
use chipchip_engine::infra::{init_logging, DeterministicRng, FixedRng, IdGenerator, RandomSource, SystemRng};

//
// TEST 1: одинаковый seed → одинаковые позиции дилера
//
#[test]
fn deterministic_rng_same_seed_same_positions() {
    let mut r1 = DeterministicRng::from_seed(123);
    let mut r2 = DeterministicRng::from_seed(123);

    let a: Vec<usize> = (0..32).map(|_| r1.index(9)).collect();
    let b: Vec<usize> = (0..32).map(|_| r2.index(9)).collect();

    assert_eq!(a, b, "Одинаковый seed должен давать одинаковую последовательность");
}

//
// TEST 2: индексы всегда в диапазоне
//
#[test]
fn every_source_stays_in_range() {
    let mut sources: Vec<Box<dyn RandomSource>> = vec![
        Box::new(SystemRng),
        Box::new(DeterministicRng::from_seed(7)),
        Box::new(FixedRng(11)),
    ];

    for source in sources.iter_mut() {
        for upper in 1..10 {
            assert!(source.index(upper) < upper);
        }
        assert_eq!(source.index(0), 0);
    }
}

#[test]
fn fixed_rng_wraps_around() {
    let mut rng = FixedRng(5);
    assert_eq!(rng.index(3), 2);
    assert_eq!(rng.index(10), 5);
}

//
// TEST 3: ID
//
#[test]
fn id_generator_counts_each_entity_separately() {
    let ids = IdGenerator::default();

    assert_eq!(ids.next_player_id(), 1);
    assert_eq!(ids.next_player_id(), 2);
    assert_eq!(ids.next_croupier_id(), 1);
    assert_eq!(ids.next_player_id(), 3);
}

//
// TEST 4: конфиг
//
#[test]
fn config_from_json_with_explicit_chips() {
    let config = CroupierConfig::from_json(
        r#"{"id": 3, "owner": {"id": 10, "name": "host"}, "chips": 250}"#,
    )
    .expect("валидный конфиг");

    assert_eq!(config.id, 3);
    assert_eq!(config.chips, Chips(250));
    assert_ne!(config.chips, DEFAULT_CHIPS);
}

#[test]
fn config_errors_are_typed() {
    let zero = CroupierConfig::from_json(r#"{"id": 1, "owner": {"id": 1, "name": "host"}, "chips": 0}"#);
    assert!(matches!(zero, Err(ConfigError::ZeroChips)));

    let broken = CroupierConfig::from_json("{");
    assert!(matches!(broken, Err(ConfigError::Json(_))));
}

#[test]
fn init_logging_is_idempotent() {
    init_logging();
    init_logging();
}
