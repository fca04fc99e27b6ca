use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flight2ics_core::config::IcsSettings;
use flight2ics_core::ics::{IcsBuilder, IcsDownload};
use flight2ics_core::lookup::FlightLookup;
use owo_colors::OwoColorize;

/// Where the invite goes.
pub enum Target {
    Stdout,
    Dir(PathBuf),
}

pub async fn run<L: FlightLookup>(
    lookup: &L,
    settings: &IcsSettings,
    flight_number: &str,
    target: Target,
) -> Result<()> {
    let flight = lookup.lookup(flight_number).await?;
    let download = IcsBuilder::new(settings.clone()).download(&flight);

    match target {
        Target::Stdout => write_download(&mut std::io::stdout().lock(), &download)?,
        Target::Dir(dir) => {
            let path = save_download(&dir, &download)?;
            println!("{}", format!("  Saved: {}", path.display()).green());
        }
    }

    Ok(())
}

/// Write the invite as-is, with no newline after `END:VCALENDAR`.
pub fn write_download<W: Write>(out: &mut W, download: &IcsDownload) -> Result<()> {
    out.write_all(download.content.as_bytes())
        .and_then(|()| out.flush())
        .context("Failed to write invite")
}

/// Write the invite into `dir` under its suggested filename.
pub fn save_download(dir: &Path, download: &IcsDownload) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(&download.filename);
    std::fs::write(&path, &download.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Wrote {}", path.display());

    Ok(path)
}
