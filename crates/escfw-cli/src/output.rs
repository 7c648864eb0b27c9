//! Output formatting for CLI responses

use anyhow::{Error, Result};
use colored::*;
use escfw_params::{IMAGE_LEN, Parameter, ParameterStore};
use serde_json::{Value, json};

use crate::error::CliError;

const DUMP_LINE_BYTES: usize = 16;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::ParamNotFound(_)) => "param_not_found",
        Some(CliError::InvalidValue(_)) => "invalid_value",
        Some(CliError::Storage(_)) => "storage",
        Some(CliError::IoError(_)) => "io",
        Some(CliError::JsonError(_)) => "json",
        None => "error",
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(CliError::from)?
    );
    Ok(())
}

/// Print the whole table in specified format
pub fn print_param_list(store: &ParameterStore, json: bool) -> Result<()> {
    if json {
        let params: Vec<&Parameter> = store.iter().collect();
        return print_json(&json!({
            "success": true,
            "count": params.len(),
            "params": params
        }));
    }

    println!("{}", "Parameters:".bold());
    for param in store {
        print_param_row(param);
    }
    Ok(())
}

/// Print a single parameter in specified format
pub fn print_param(param: &Parameter, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "success": true,
            "param": param
        }));
    }

    print_param_row(param);
    Ok(())
}

fn print_param_row(param: &Parameter) {
    let marker = if param.is_default() {
        " ".normal()
    } else {
        "*".yellow().bold()
    };
    println!(
        "  {:>2} {} {:<26} {:>12} {}",
        param.index(),
        marker,
        param.name(),
        param.value(),
        format!("[{}, {}]", param.min_value(), param.max_value()).dimmed()
    );
}

/// Print a typed view in specified format
pub fn print_view(name: &str, value: &Value, json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "success": true,
            "view": name,
            "params": value
        }));
    }

    println!("{}", format!("{name} parameters:").bold());
    if let Value::Object(fields) = value {
        for (field, field_value) in fields {
            match field_value {
                Value::String(s) => println!("  {field:<24} {s}"),
                other => println!("  {field:<24} {other}"),
            }
        }
    }
    Ok(())
}

/// Print the encoded image as hex
pub fn print_dump(image: &[u8; IMAGE_LEN], json: bool) -> Result<()> {
    if json {
        let hex: String = image.iter().map(|b| format!("{b:02x}")).collect();
        return print_json(&json!({
            "success": true,
            "len": image.len(),
            "hex": hex
        }));
    }

    for (line, chunk) in image.chunks(DUMP_LINE_BYTES).enumerate() {
        let bytes: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        println!(
            "{} {}",
            format!("{:04x}:", line.saturating_mul(DUMP_LINE_BYTES)).dimmed(),
            bytes.join(" ")
        );
    }
    Ok(())
}
