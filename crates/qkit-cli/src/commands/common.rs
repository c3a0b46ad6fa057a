//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use num_complex::Complex64;
use tracing::debug;

use qkit_ir::NativeKind;
use qkit_tools::ToolsConfig;

/// Load the tools configuration from `path`, or from `QKIT_*` variables when
/// no file is given.
pub fn load_config(path: Option<&str>) -> Result<ToolsConfig> {
    let config = match path {
        Some(path) => ToolsConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {path}"))?,
        None => {
            let config = ToolsConfig::from_env();
            config
                .validate()
                .context("Invalid configuration from environment")?;
            config
        }
    };
    debug!(?config, "loaded configuration");
    Ok(config)
}

/// Resolve gate names into native kinds. An empty list selects every kind.
pub fn parse_gate_set(names: &[String]) -> Result<Vec<NativeKind>> {
    if names.is_empty() {
        return Ok(NativeKind::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| {
            NativeKind::from_name(name.trim()).ok_or_else(|| {
                let known: Vec<&str> = NativeKind::ALL.iter().map(|k| k.name()).collect();
                anyhow::anyhow!("Unknown gate: '{name}'. Available: {}", known.join(", "))
            })
        })
        .collect()
}

/// Parse a complex amplitude written as `0.5`, `-1j`, `0.5+0.5j` or `(1-2j)`.
pub fn parse_complex(text: &str) -> Result<Complex64> {
    let s = text.trim();
    let s = s
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(s)
        .replace(' ', "");
    let bad = || anyhow::anyhow!("Invalid amplitude: '{text}'");

    let Some(body) = s.strip_suffix('j').or_else(|| s.strip_suffix('i')) else {
        let re: f64 = s.parse().map_err(|_| bad())?;
        return Ok(Complex64::new(re, 0.0));
    };

    // Split before the last sign that is not part of an exponent.
    let split = body
        .char_indices()
        .filter(|&(i, c)| {
            (c == '+' || c == '-')
                && i > 0
                && !matches!(body.as_bytes()[i - 1], b'e' | b'E')
        })
        .map(|(i, _)| i)
        .last();

    let (re_text, im_text) = match split {
        Some(i) => (&body[..i], &body[i..]),
        None => ("", body),
    };
    let re = if re_text.is_empty() {
        0.0
    } else {
        re_text.parse().map_err(|_| bad())?
    };
    let im = match im_text {
        "" | "+" => 1.0,
        "-" => -1.0,
        other => other.parse().map_err(|_| bad())?,
    };
    Ok(Complex64::new(re, im))
}
