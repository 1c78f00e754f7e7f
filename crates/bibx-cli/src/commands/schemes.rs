use bibx_core::KeyScheme;

use super::{CommandOutput, SchemeEntry};

pub fn run() -> CommandOutput {
    let entries = KeyScheme::ALL
        .iter()
        .map(|scheme| SchemeEntry {
            name: scheme.as_str().to_ascii_lowercase(),
            bibkey_prefix: format!("{}:", scheme.as_str()),
        })
        .collect();

    CommandOutput::Schemes(entries)
}
