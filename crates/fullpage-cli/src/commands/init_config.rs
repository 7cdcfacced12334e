use anyhow::{bail, Result};

use fullpage_core::AppConfig;

pub fn run(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}\nUse --force to overwrite it.",
            path.display()
        );
    }

    let written = AppConfig::default().save()?;
    println!("Wrote default config to {}", written.display());
    Ok(())
}
