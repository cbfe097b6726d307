use std::sync::OnceLock;

use regex::{Captures, Regex};

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern is valid")
    })
}

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// A `default("fallback")` clause makes the placeholder optional: when the
/// variable is unset the fallback is substituted instead of erroring. This
/// is how the API credential stays optional: `{{ env.HF_API_KEY |
/// default("") }}` resolves to an empty key, which the backend treats as
/// "no credential configured".
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut missing = None;

    let expanded = placeholder_re().replace_all(input, |caps: &Captures<'_>| {
        let var = &caps[1];
        match std::env::var(var) {
            Ok(value) => value,
            Err(_) => caps.get(2).map_or_else(
                || {
                    missing.get_or_insert_with(|| var.to_string());
                    String::new()
                },
                |default| default.as_str().to_owned(),
            ),
        }
    });

    match missing {
        Some(var) => Err(format!("environment variable not found: `{var}`")),
        None => Ok(expanded.into_owned()),
    }
}
