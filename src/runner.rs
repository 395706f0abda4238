use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use log::info;

use plum8::{nb, Context, Plum8};

use crate::config::Settings;

/// Host side of a `Context` that the run loop drives between frames
pub trait Frontend: Context {
    /// Collect pending input, never blocks
    fn pump_events(&mut self) -> io::Result<()>;
    fn quit_requested(&self) -> bool;
    /// Error swallowed by one of the `Context` ports since the last call
    fn take_error(&mut self) -> Option<io::Error>;
}

/// Why the run loop stopped without an error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Exit {
    Quit,
    FrameLimit,
}

/// Fixed-rate loop calling `Plum8::cycle` once per frame
pub struct Runner {
    period: Duration,
    frames: Option<u64>,
}

impl Runner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            period: settings.frame_period(),
            frames: settings.frames,
        }
    }

    pub fn with_period(period: Duration, frames: Option<u64>) -> Self {
        Self { period, frames }
    }

    /// Run until the user quits, the frame limit is hit, or the machine halts
    ///
    /// A halted machine is reported as an error wrapping `plum8::Error`.
    pub fn run<F: Frontend>(&self, plum: &mut Plum8<F>) -> anyhow::Result<Exit> {
        info!("running at one frame per {:?}", self.period);
        let mut frame = 0u64;
        let mut previous = Instant::now();
        loop {
            if self.frames.map_or(false, |limit| frame >= limit) {
                info!("stopping after {} frames", frame);
                return Ok(Exit::FrameLimit);
            }

            plum.ctx_mut()
                .pump_events()
                .context("cannot read terminal events")?;
            if plum.ctx().quit_requested() {
                info!("quit requested after {} frames", frame);
                return Ok(Exit::Quit);
            }

            match plum.cycle() {
                Ok(()) | Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(error)) => return Err(error.into()),
            }
            if let Some(error) = plum.ctx_mut().take_error() {
                return Err(error).context("cannot write to terminal");
            }
            frame += 1;

            let next = previous + self.period;
            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
                previous = next;
            } else {
                previous = now;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use plum8::{Builder, FrameView};

    #[derive(Default)]
    struct FakeFrontend {
        pumps: usize,
        frames: usize,
        quit_after: Option<usize>,
        fail_output: bool,
        keys: [bool; 16],
    }

    impl Context for FakeFrontend {
        fn on_frame(&mut self, _frame: FrameView<'_>) {
            self.frames += 1;
        }

        fn play_sound(&mut self, _gain: f32, _frequency: f32) {}

        fn stop_sound(&mut self) {}

        fn get_keys(&mut self) -> &[bool; 16] {
            &self.keys
        }

        fn gen_random(&mut self) -> u8 {
            4
        }
    }

    impl Frontend for FakeFrontend {
        fn pump_events(&mut self) -> io::Result<()> {
            self.pumps += 1;
            Ok(())
        }

        fn quit_requested(&self) -> bool {
            self.quit_after.map_or(false, |after| self.pumps > after)
        }

        fn take_error(&mut self) -> Option<io::Error> {
            if self.fail_output {
                Some(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            } else {
                None
            }
        }
    }

    fn machine(frontend: FakeFrontend, prog: &[u8]) -> Plum8<FakeFrontend> {
        let _ = env_logger::builder().is_test(true).try_init();

        Builder::new()
            .with_context(frontend)
            .with_program(prog)
            .build()
            .unwrap()
    }

    // 00E0, then jump to itself
    const CLEAR_AND_SPIN: [u8; 4] = [0x00, 0xE0, 0x12, 0x02];

    #[test]
    fn stops_at_frame_limit() {
        let mut plum = machine(FakeFrontend::default(), &CLEAR_AND_SPIN);
        let runner = Runner::with_period(Duration::ZERO, Some(3));
        assert_eq!(runner.run(&mut plum).unwrap(), Exit::FrameLimit);
        assert_eq!(plum.ctx().pumps, 3);
        assert_eq!(plum.ctx().frames, 1);
    }

    #[test]
    fn stops_on_quit() {
        let frontend = FakeFrontend {
            quit_after: Some(2),
            ..FakeFrontend::default()
        };
        let mut plum = machine(frontend, &CLEAR_AND_SPIN);
        let runner = Runner::with_period(Duration::ZERO, None);
        assert_eq!(runner.run(&mut plum).unwrap(), Exit::Quit);
        assert_eq!(plum.ctx().pumps, 3);
    }

    #[test]
    fn keeps_running_while_waiting_for_key() {
        let mut plum = machine(FakeFrontend::default(), &[0xF0, 0x0A]);
        let runner = Runner::with_period(Duration::ZERO, Some(5));
        assert_eq!(runner.run(&mut plum).unwrap(), Exit::FrameLimit);
        assert_eq!(plum.state(), plum8::MachineState::WaitingForKey { register: 0 });
    }

    #[test]
    fn reports_halted_machine() {
        let mut plum = machine(FakeFrontend::default(), &[0x00, 0xEE]);
        let runner = Runner::with_period(Duration::ZERO, None);
        let error = runner.run(&mut plum).unwrap_err();
        assert_eq!(
            error.downcast_ref::<plum8::Error>(),
            Some(&plum8::Error::StackUnderflow { address: 0x200 }),
        );
    }

    #[test]
    fn reports_output_errors() {
        let frontend = FakeFrontend {
            fail_output: true,
            ..FakeFrontend::default()
        };
        let mut plum = machine(frontend, &CLEAR_AND_SPIN);
        let runner = Runner::with_period(Duration::ZERO, None);
        let error = runner.run(&mut plum).unwrap_err();
        assert!(error.downcast_ref::<plum8::Error>().is_none());
        assert!(error.to_string().contains("terminal"));
    }

    #[test]
    fn paces_frames() {
        let mut plum = machine(FakeFrontend::default(), &CLEAR_AND_SPIN);
        let runner = Runner::with_period(Duration::from_millis(5), Some(4));
        let started = Instant::now();
        runner.run(&mut plum).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(15));
    }
}
