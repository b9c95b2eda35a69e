//! Stateful domain services.

mod cooldown_table;

pub use cooldown_table::CooldownTable;
