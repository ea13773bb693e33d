//! Map service names to artifact paths.

use std::path::PathBuf;

use crate::config::GeneratorConfig;

/// Directory under the per-service directory that holds server-side artifacts.
pub const SERVER_DIR: &str = "server";

/// Normalize a display name to lower snake case.
///
/// Word boundaries are non-alphanumeric characters, lower-to-upper transitions, digit-to-upper transitions and
/// the end of an acronym (`HTTPServer` → `http_server`). Runs of separators collapse to one `_`, and leading or
/// trailing separators are dropped. Only alphanumeric characters of the lowercase mapping are kept, so a mapping
/// that adds combining marks (`İ` → `i\u{307}`) cannot introduce a boundary on a second pass.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    let mut pending_sep = false;

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            pending_sep = true;
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                pending_sep = true;
            }
        }
        let lowered: String = c.to_lowercase().filter(|l| l.is_alphanumeric()).collect();
        if lowered.is_empty() {
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.push_str(&lowered);
    }

    out
}

/// Path of the server types artifact for `service_name`:
/// `<gen_dir>/<protocol>/<snake name>/server/<file_name>`.
pub fn artifact_path(config: &GeneratorConfig, service_name: &str) -> PathBuf {
    config
        .gen_dir
        .join(&config.protocol)
        .join(snake_case(service_name))
        .join(SERVER_DIR)
        .join(&config.file_name)
}
