//! `abd discover <identifier>[,label=value]*` – resolve and print metadata.

use abd_core::config::AbdSettings;
use anyhow::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

pub fn run_discover(settings: &AbdSettings, input: &str) -> Result<()> {
    let metadata = abd_core::discover(input, settings).inspect_err(|e| {
        if !e.is_input_error() {
            tracing::warn!("discovery of {:?} failed: {}", input, e);
        }
    })?;
    println!("{}", to_indented_json(&metadata)?);
    Ok(())
}

/// JSON indented with four spaces.
fn to_indented_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use abd_core::{Labels, Metadata, Mirror};

    #[test]
    fn metadata_is_indented_with_four_spaces() {
        let mut labels = Labels::new();
        labels.insert("os".to_string(), "linux".to_string());
        let m = Metadata {
            identifier: "example.com/app".to_string(),
            labels,
            mirrors: vec![Mirror {
                artifact: "https://example.com/app.aci".to_string(),
                signature: "https://example.com/app.aci.asc".to_string(),
            }],
        };
        let out = to_indented_json(&m).unwrap();
        let expected = r#"{
    "identifier": "example.com/app",
    "labels": {
        "os": "linux"
    },
    "mirrors": [
        {
            "artifact": "https://example.com/app.aci",
            "signature": "https://example.com/app.aci.asc"
        }
    ]
}"#;
        assert_eq!(out, expected);
    }
}
