#![no_std]
pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod frame;
pub mod keypad;
pub mod memory;
pub mod opcode;
pub mod plum;
pub mod timer;
#[cfg(test)]
mod utils;

pub use builder::{BuildError, Builder};
pub use config::Config;
pub use context::Context;
pub use error::Error;
pub use frame::{Frame, FrameView};
pub use keypad::Keypad;
pub use opcode::OpCode;
pub use plum::{MachineState, Plum8};

// Used by ports taking `nb::Result`s from `cycle` and `step`
pub use nb;
