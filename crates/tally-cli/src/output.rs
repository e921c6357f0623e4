use std::fmt::Display;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a response as its text form or as pretty JSON.
pub fn render<T: Serialize + Display>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + Display>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}
