pub mod config;
pub mod dice;
pub mod error;
pub mod types;

pub use config::HeistConfig;
pub use dice::{Dice, RngDice, SeededDice};
pub use error::{HeistError, Result};
