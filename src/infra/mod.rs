//! Инфраструктурный слой вокруг движка:
//! - генерация ID;
//! - RNG-реализации для выбора дилера;
//! - подключение логирования.

pub mod ids;
pub mod logging;
pub mod rng;

pub use ids::*;
pub use logging::init_logging;
pub use rng::*;
