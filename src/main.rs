use anyhow::Result;
use std::process;

use distance_ticker::{PollLoop, RunConfig, TickerError};

fn main() -> Result<()> {
    env_logger::init();

    let config = match RunConfig::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(usage @ TickerError::Usage { .. }) => {
            println!("{usage}");
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    PollLoop::new(config).run()?;
    Ok(())
}
