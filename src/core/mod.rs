//! Due-date rule and the types it works on.

pub mod calculator;
pub mod dates;
pub mod error;
pub mod output;
pub mod policy;
pub mod record;
pub mod time;
pub mod types;
