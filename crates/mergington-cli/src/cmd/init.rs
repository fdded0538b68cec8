use anyhow::{bail, Context};
use mergington_core::config::Config;
use mergington_core::io;
use std::path::Path;

pub fn run(config_path: &Path, force: bool) -> anyhow::Result<()> {
    let data = Config::default().to_yaml()?;
    let result = if force {
        io::atomic_write(config_path, data.as_bytes()).map(|_| true)
    } else {
        io::write_if_missing(config_path, data.as_bytes())
    };
    let written =
        result.with_context(|| format!("failed to write {}", config_path.display()))?;

    if !written {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    println!("Wrote {}", config_path.display());
    Ok(())
}
