//! Exact fractions over 64-bit magnitudes.
//!
//! A [`Fraction`] is always in lowest terms, never has a zero denominator
//! and keeps its sign apart from its magnitude. Arithmetic that would
//! overflow reports [`FractionError::OutOfRange`] instead of wrapping.

pub mod chain;

pub mod config;

pub mod dispatcher;

pub mod error;

pub mod exec_env;

pub mod fraction;

pub mod utils;

pub use error::FractionError;
pub use fraction::Fraction;

pub mod prelude {
    pub use crate::chain::Chain;
    pub use crate::config::ReplConfig;
    pub use crate::dispatcher::{DispatchResult, Dispatcher};
    pub use crate::error::FractionError;
    pub use crate::exec_env::ExecEnv;
    pub use crate::fraction::Fraction;
}
