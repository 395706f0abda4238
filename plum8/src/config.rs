/// Tunables of a `Plum8` instance
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Instructions executed per `cycle` call
    pub speed: usize,
    /// Gain handed to `Context::play_sound`
    pub sound_gain: f32,
    /// Tone frequency in Hz handed to `Context::play_sound`
    pub sound_frequency: f32,
    /// Whether timers keep counting down while waiting for a key
    pub timers_while_waiting: bool,
}

impl Config {
    pub const DEFAULT_SPEED: usize = 10;

    pub fn with_speed(mut self, speed: usize) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sound(mut self, gain: f32, frequency: f32) -> Self {
        self.sound_gain = gain;
        self.sound_frequency = frequency;
        self
    }

    pub fn with_timers_while_waiting(mut self, enabled: bool) -> Self {
        self.timers_while_waiting = enabled;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: Self::DEFAULT_SPEED,
            sound_gain: 1.0,
            sound_frequency: 440.0,
            timers_while_waiting: true,
        }
    }
}
