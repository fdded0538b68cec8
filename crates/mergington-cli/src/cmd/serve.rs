use anyhow::Context;
use mergington_core::config::{Config, WarnLevel};
use std::path::Path;

pub fn run(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
    open_browser: bool,
) -> anyhow::Result<()> {
    let mut config = Config::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    for w in config.validate() {
        match w.level {
            WarnLevel::Warning => tracing::warn!("{}", w.message),
            WarnLevel::Error => tracing::error!("{}", w.message),
        }
    }

    let registry = config
        .build_registry()
        .context("failed to seed the activity registry")?;
    let addr = config.server.addr();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        mergington_server::serve(registry, &addr, open_browser)
            .await
            .with_context(|| format!("server on {addr} failed"))
    })
}
