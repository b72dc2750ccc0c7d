use analyzer::Rule;
use anyhow::Result;
use serde_json::json;
use std::path::Path;
use strum::IntoEnumIterator;

use super::load_config;
use crate::cli::OutputFormat;

pub fn run(config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = load_config(config, None)?;

    match format {
        OutputFormat::Text => {
            for rule in Rule::iter() {
                let descriptor = rule.descriptor();
                let severity = config.severity_for(rule).map_or("off", |s| s.as_str());
                println!(
                    "{:<14}{:<9}{:<22}{}",
                    descriptor.id, severity, descriptor.category, descriptor.title
                );
            }
        }
        OutputFormat::Json => {
            let rules: Vec<_> = Rule::iter()
                .map(|rule| {
                    json!({
                        "rule": rule.descriptor(),
                        "severity": config.severity_for(rule),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}
