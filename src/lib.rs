//! Terminal host for the `plum8` CHIP-8 machine
//!
//! ```text
//! keypad        keyboard
//! |1|2|3|C|     |1|2|3|4|
//! |4|5|6|D|     |Q|W|E|R|
//! |7|8|9|E|     |A|S|D|F|
//! |A|0|B|F|     |Z|X|C|V|
//! ```
pub mod config;
pub mod logger;
pub mod runner;
pub mod terminal;

pub use config::{Args, Settings};
pub use logger::Logger;
pub use runner::{Exit, Frontend, Runner};
pub use terminal::TerminalContext;
