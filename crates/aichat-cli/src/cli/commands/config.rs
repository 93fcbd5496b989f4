//! Configuration commands.

use anyhow::Result;

use aichat_core::config::Config;
use aichat_core::paths;

pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let config_path = paths::config_path();
    Config::init(&config_path)?;
    println!("Created default config at {}", config_path.display());
    Ok(())
}
