//! Config command - show the effective configuration.

use anyhow::Result;

use super::Settings;

pub fn show(settings: &Settings, json: bool) -> Result<()> {
    let config = &settings.config;

    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("Config file:          {}", settings.config_path.display());
    println!("Watch interval:       {}s", config.watch_period().as_secs());
    println!("Command timeout:      {}ms", config.command_timeout().as_millis());
    println!("Default sort:         {}", config.default_sort);
    println!("ASCII indicators:     {}", config.ascii_indicators);
    println!("Container enrichment: {}", config.container_enrichment);
    println!("Connection counts:    {}", config.connection_counts);
    Ok(())
}
