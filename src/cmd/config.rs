use anyhow::Result;

use tablesnap::config::config_path;
use tablesnap::Config;

pub fn cmd_config(config: &Config) -> Result<()> {
    match config_path() {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not found, using defaults)", path.display()),
        None => println!("# no config directory, using defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
