use analyzer::{Resolution, resolve_declaration};
use anyhow::{Result, anyhow};
use std::path::Path;
use symbols::SymbolId;

use super::load_model;
use crate::cli::OutputFormat;

pub fn run(model_path: &Path, symbol: &str, format: OutputFormat) -> Result<()> {
    let model = load_model(model_path)?;
    let id = SymbolId::new(symbol);
    let declaration = model
        .declaration_for(&id)
        .ok_or_else(|| anyhow!("No declaration for symbol {symbol} in {}", model_path.display()))?;
    let resolution = resolve_declaration(&model, declaration)
        .ok_or_else(|| anyhow!("Declaration '{}' is not bound", declaration.identifier))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolution)?),
        OutputFormat::Text => println!("{}", describe(&resolution)),
    }
    Ok(())
}

fn describe(resolution: &Resolution) -> String {
    match resolution {
        Resolution::NotAPatch => "not a patch".to_string(),
        Resolution::Unresolved { reason } => format!("unresolved: {reason}"),
        Resolution::Resolved(context) => {
            let target = match &context.target_method {
                None => "no matching member".to_string(),
                Some(targets) => targets
                    .iter()
                    .map(SymbolId::to_string)
                    .collect::<Vec<_>>()
                    .join(" | "),
            };
            format!(
                "{} patch of {}: {}",
                context.role, context.target_type, target
            )
        }
    }
}
