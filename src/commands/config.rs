//! Config subcommands handler

use anyhow::Result;
use std::path::PathBuf;

use subcue::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Show which config file is (or would be) used.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(explicit: Option<PathBuf>) -> Result<()> {
    let path = match explicit {
        Some(path) => path,
        None => Config::config_path()?,
    };
    println!("{}", path.display());
    Ok(())
}
