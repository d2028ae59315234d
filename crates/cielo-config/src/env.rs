use std::sync::LazyLock;

use regex::{Captures, Regex};

// Group 1: scoped key (`env.VAR`), group 2: optional `default("...")` value
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
});

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// `{{ env.VAR | default("value") }}` falls back to `value` when the
/// variable is unset. Comment lines are copied verbatim so a commented-out
/// credential never has to exist in the environment.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut output = input
        .lines()
        .map(expand_line)
        .collect::<Result<Vec<_>, _>>()?
        .join("\n");

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, String> {
    if line.trim_start().starts_with('#') {
        return Ok(line.to_owned());
    }

    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in PLACEHOLDER.captures_iter(line) {
        let Some(whole) = captures.get(0) else {
            continue;
        };

        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(&captures)?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

fn resolve(captures: &Captures<'_>) -> Result<String, String> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let fallback = captures.get(2).map(|m| m.as_str().to_owned());

    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    std::env::var(var_name)
        .ok()
        .or(fallback)
        .ok_or_else(|| format!("environment variable not found: `{var_name}`"))
}
