use std::path::Path;

use anyhow::{Context, Result};
use flight2ics_core::ics::parse_invite;

use crate::render::Render;

pub fn run(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let invite = parse_invite(&content)
        .with_context(|| format!("{} is not a readable flight invite", file.display()))?;

    println!("{}", invite.render());

    Ok(())
}
