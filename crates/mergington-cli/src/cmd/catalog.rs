use crate::output::{print_json, print_table};
use anyhow::Context;
use mergington_core::config::Config;
use std::path::Path;

pub fn run(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let catalog = config.catalog().context("failed to load catalog")?;

    if json {
        return print_json(&catalog);
    }

    let rows = catalog
        .iter()
        .map(|(name, a)| {
            vec![
                name.clone(),
                a.schedule.clone(),
                format!("{}/{}", a.participants.len(), a.max_participants),
                a.spots_left().to_string(),
            ]
        })
        .collect();
    print_table(&["ACTIVITY", "SCHEDULE", "ENROLLED", "SPOTS LEFT"], rows);
    Ok(())
}
