//! Внешний API движка.
//!
//! Здесь описываются:
//! - команды (commands.rs) – всё, что приходит из общего канала действий;
//! - запросы (queries.rs) – только чтение;
//! - DTO (dto.rs) – удобные структуры для фронта.

pub mod commands;
pub mod dto;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use queries::*;
