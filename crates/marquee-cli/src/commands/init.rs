use std::path::Path;

use anyhow::{bail, Context, Result};

use marquee_core::AppConfig;

/// Write the default configuration to `path`
pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    AppConfig::default()
        .save_to(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Wrote default configuration to {}", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}
