//! Input resolution for CLI commands.
//!
//! `hashi call` takes either positional arguments, converted to values
//! by [`parse_arg`], or a complete request body via `--file` (use `-`
//! for stdin).

use std::io::Read;
use std::path::Path;

use hashi_types::Value;

/// Converts one command-line argument to a value.
///
/// Tried in order: integer, double, `true`/`false`, otherwise string.
pub fn parse_arg(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(d) = raw.parse::<f64>() {
        if d.is_finite() {
            return Value::Double(d);
        }
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::from(raw),
    }
}

/// Reads a request body from a file path, or stdin for `-`.
pub fn read_body(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
        return Ok(buffer);
    }

    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("request file not found: {path}");
    }
    std::fs::read_to_string(file_path).map_err(|e| anyhow::anyhow!("failed to read request file: {e}"))
}
