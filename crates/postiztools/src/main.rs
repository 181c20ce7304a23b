#![allow(unused)]

use crate::prelude::*;

mod cli;
mod error;
mod mcp;
mod postiz;
mod prelude;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let exit_code = cli::run().await?;

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
