use std::fs::{self, File};

use anyhow::Context as _;
use clap::Parser;
use log::{error, info};

use plum8::Builder;
use plum8_host::{logger, Args, Runner, Settings, TerminalContext};

fn main() -> anyhow::Result<()> {
    let settings = Settings::from(Args::parse());

    let log_file = File::create(&settings.log_file)
        .with_context(|| format!("cannot create log file {}", settings.log_file.display()))?;
    logger::init(settings.log_level, log_file).context("cannot install logger")?;

    let rom = fs::read(&settings.rom)
        .with_context(|| format!("cannot read ROM {}", settings.rom.display()))?;
    info!("loaded {} ({} bytes)", settings.rom.display(), rom.len());

    let ctx = TerminalContext::new(settings.mute).context("cannot set up terminal")?;
    let mut plum = Builder::new()
        .with_context(ctx)
        .with_program(&rom)
        .with_config(settings.machine_config())
        .build()?;

    let exit = Runner::new(&settings).run(&mut plum);
    // give the terminal back before anything is printed
    drop(plum);

    match &exit {
        Ok(reason) => info!("finished: {:?}", reason),
        Err(e) => error!("{:#}", e),
    }
    log::logger().flush();
    exit.map(|_| ())
}
