//! Common types used across the application.

pub mod money;

pub use money::{Currency, MONEY_DECIMAL_PLACES, SymbolPosition, round_money};
