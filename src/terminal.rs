//! `plum8::Context` on top of an ANSI terminal
//!
//! Two rows of pixels share one line of text through half-block characters,
//! so the whole 64x32 frame fits in 64 columns by 16 lines.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use log::{debug, warn};

use plum8::frame::{HEIGHT, WIDTH};
use plum8::keypad::{bind_qwerty, KEYS};
use plum8::{Context, FrameView};

use crate::runner::Frontend;

/// Frames a key stays down after a press when the terminal reports no releases
pub const HOLD_FRAMES: u8 = 8;

const BELL: char = '\x07';

pub struct TerminalContext<W: Write> {
    out: W,
    keys: [bool; KEYS],
    held: [u8; KEYS],
    release_events: bool,
    sound_on: bool,
    mute: bool,
    quit: bool,
    entered: bool,
    error: Option<io::Error>,
}

impl TerminalContext<Stdout> {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    ///
    /// Everything is restored when the context is dropped.
    pub fn new(mute: bool) -> io::Result<Self> {
        let mut ctx = Self::with_writer(io::stdout(), mute);
        ctx.enter()?;
        Ok(ctx)
    }

    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        execute!(self.out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.release_events = true;
        }
        debug!("terminal ready, key release events: {}", self.release_events);
        Ok(())
    }
}

impl<W: Write> TerminalContext<W> {
    /// Context drawing into `out` without touching the terminal modes
    pub fn with_writer(out: W, mute: bool) -> Self {
        Self {
            out,
            keys: [false; KEYS],
            held: [0; KEYS],
            release_events: false,
            sound_on: false,
            mute,
            quit: false,
            entered: false,
            error: None,
        }
    }

    /// Apply a single terminal event to the key state
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Char(c) => {
                if let Some(code) = bind_qwerty(c) {
                    let code = code as usize;
                    match key.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            self.keys[code] = true;
                            self.held[code] = HOLD_FRAMES;
                        }
                        KeyEventKind::Release => {
                            self.keys[code] = false;
                            self.held[code] = 0;
                        }
                    }
                }
            }
            _ => {}
        }
    }

    /// Let go of keys whose hold ran out, unless releases are reported
    fn tick_held_keys(&mut self) {
        if self.release_events {
            return;
        }
        for (key, held) in self.keys.iter_mut().zip(self.held.iter_mut()) {
            if *held > 0 {
                *held -= 1;
                if *held == 0 {
                    *key = false;
                }
            }
        }
    }

    fn render(&mut self, frame: FrameView<'_>) -> io::Result<()> {
        for line in 0..HEIGHT / 2 {
            let text: String = (0..WIDTH)
                .map(|x| {
                    let top = frame.get_bit(x, 2 * line).unwrap_or(false);
                    let bottom = frame.get_bit(x, 2 * line + 1).unwrap_or(false);
                    match (top, bottom) {
                        (true, true) => '█',
                        (true, false) => '▀',
                        (false, true) => '▄',
                        (false, false) => ' ',
                    }
                })
                .collect();
            queue!(self.out, cursor::MoveTo(0, line as u16), Print(text))?;
        }
        self.out.flush()
    }

    fn ring_bell(&mut self) -> io::Result<()> {
        queue!(self.out, Print(BELL))?;
        self.out.flush()
    }

    /// Keep the first error, the ports have no way to return it
    fn record(&mut self, result: io::Result<()>) {
        if let Err(error) = result {
            warn!("terminal output failed: {}", error);
            self.error.get_or_insert(error);
        }
    }
}

impl<W: Write> Context for TerminalContext<W> {
    fn on_frame(&mut self, frame: FrameView<'_>) {
        let result = self.render(frame);
        self.record(result);
    }

    fn play_sound(&mut self, _gain: f32, _frequency: f32) {
        if !self.sound_on {
            self.sound_on = true;
            if !self.mute {
                let result = self.ring_bell();
                self.record(result);
            }
        }
    }

    fn stop_sound(&mut self) {
        self.sound_on = false;
    }

    fn get_keys(&mut self) -> &[bool; KEYS] {
        &self.keys
    }

    fn gen_random(&mut self) -> u8 {
        rand::random::<u8>()
    }
}

impl<W: Write> Frontend for TerminalContext<W> {
    fn pump_events(&mut self) -> io::Result<()> {
        self.tick_held_keys();
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle_event(event);
        }
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<W: Write> Drop for TerminalContext<W> {
    fn drop(&mut self) {
        if !self.entered {
            return;
        }
        if self.release_events {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
