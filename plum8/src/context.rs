//! Context for accessing functionalities of platform that `Plum8` is
//! emulated on.
//!
//! The context is a single value owned by the caller and moved into `Plum8`
//! at construction. Every method is called synchronously from `cycle` and is
//! expected to return without blocking.

use crate::frame::FrameView;
use crate::keypad::KEYS;

/// Trait aggregating platform functionalities
pub trait Context {
    /// Draw current frame to the screen
    ///
    /// Called by `cycle` at its end whenever the frame changed since the last call
    fn on_frame(&mut self, frame: FrameView<'_>);
    /// Start or keep playing a tone
    ///
    /// Called by `cycle` at its end while the sound timer is running
    fn play_sound(&mut self, gain: f32, frequency: f32);
    /// Silence the tone
    ///
    /// Called by `cycle` at its end while the sound timer is stopped
    fn stop_sound(&mut self);
    /// Get state of each key on 4x4 keyboard, indexed by key code
    ///
    /// Called by `cycle` before any instruction is executed
    fn get_keys(&mut self) -> &[bool; KEYS];
    /// Generate random 8-bit number
    ///
    /// Called whenever requested by executing program
    fn gen_random(&mut self) -> u8;
}
