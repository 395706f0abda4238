use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

pub const DEFAULT_FRAME_RATE: u64 = 60;
pub const DEFAULT_LOG_FILE: &str = "plum8.log";

/// Run a CHIP-8 program in the terminal
///
/// Keys 1234/QWER/ASDF/ZXCV stand for the hexadecimal keypad, Esc quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(help = "Path to the ROM file to run")]
    pub rom: PathBuf,

    #[arg(short, long, default_value_t = plum8::Config::DEFAULT_SPEED, help = "Instructions executed per frame")]
    pub speed: usize,

    #[arg(
        short,
        long,
        default_value_t = DEFAULT_FRAME_RATE,
        value_parser = clap::value_parser!(u64).range(1..=1000),
        help = "Frames per second, timers tick once per frame"
    )]
    pub frame_rate: u64,

    #[arg(long, help = "Quit after this many frames")]
    pub frames: Option<u64>,

    #[arg(short, long, default_value_t = LevelFilter::Info, help = "Most verbose level written to the log file")]
    pub log_level: LevelFilter,

    #[arg(long, default_value = DEFAULT_LOG_FILE, help = "File the log is written to")]
    pub log_file: PathBuf,

    #[arg(short, long, help = "Do not ring the terminal bell")]
    pub mute: bool,
}

/// Everything the host needs to know to run a program
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub rom: PathBuf,
    pub speed: usize,
    pub frame_rate: u64,
    pub frames: Option<u64>,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub mute: bool,
}

impl Settings {
    pub fn frame_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000u64 / self.frame_rate.max(1))
    }

    pub fn machine_config(&self) -> plum8::Config {
        plum8::Config::default().with_speed(self.speed)
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            rom: args.rom,
            speed: args.speed,
            frame_rate: args.frame_rate,
            frames: args.frames,
            log_level: args.log_level,
            log_file: args.log_file,
            mute: args.mute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Settings, clap::Error> {
        Args::try_parse_from(args).map(Settings::from)
    }

    #[test]
    fn defaults() {
        let settings = parse(&["plum8", "pong.ch8"]).unwrap();
        assert_eq!(
            settings,
            Settings {
                rom: PathBuf::from("pong.ch8"),
                speed: 10,
                frame_rate: 60,
                frames: None,
                log_level: LevelFilter::Info,
                log_file: PathBuf::from("plum8.log"),
                mute: false,
            }
        );
        assert_eq!(settings.machine_config(), plum8::Config::default());
        assert_eq!(settings.frame_period(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn every_option() {
        let settings = parse(&[
            "plum8",
            "--speed",
            "20",
            "--frame-rate",
            "50",
            "--frames",
            "300",
            "--log-level",
            "trace",
            "--log-file",
            "/tmp/run.log",
            "--mute",
            "games/tetris.ch8",
        ])
        .unwrap();
        assert_eq!(settings.rom, PathBuf::from("games/tetris.ch8"));
        assert_eq!(settings.speed, 20);
        assert_eq!(settings.frame_period(), Duration::from_millis(20));
        assert_eq!(settings.frames, Some(300));
        assert_eq!(settings.log_level, LevelFilter::Trace);
        assert_eq!(settings.log_file, PathBuf::from("/tmp/run.log"));
        assert!(settings.mute);
        assert_eq!(settings.machine_config().speed, 20);
    }

    #[test]
    fn short_flags() {
        let settings = parse(&["plum8", "-s", "5", "-f", "30", "-l", "off", "-m", "a.ch8"]).unwrap();
        assert_eq!(settings.speed, 5);
        assert_eq!(settings.frame_rate, 30);
        assert_eq!(settings.log_level, LevelFilter::Off);
        assert!(settings.mute);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["plum8"]).is_err());
        assert!(parse(&["plum8", "a.ch8", "--frame-rate", "0"]).is_err());
        assert!(parse(&["plum8", "a.ch8", "--speed", "fast"]).is_err());
        assert!(parse(&["plum8", "a.ch8", "--log-level", "loud"]).is_err());
    }
}
