use anyhow::Result;
use flight2ics_core::config::Flight2IcsConfig;
use owo_colors::OwoColorize;

pub fn run(config: &Flight2IcsConfig) -> Result<()> {
    let config_path = Flight2IcsConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Output:  {}", config.output_path().display());
    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {line}");
    }

    Ok(())
}
