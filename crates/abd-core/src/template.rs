//! Template strategy: mirrors built by placeholder substitution.
//!
//! The stanza carries a `template` list of mirrors whose URIs may contain
//! `<identifier>` and `<label-name>` placeholders.

use serde::Deserialize;

use crate::schema::{Labels, Metadata, Mirror};

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub template: Vec<Mirror>,
}

/// Fills every template mirror for `identifier` and `labels`.
pub fn render(config: &TemplateConfig, identifier: &str, labels: &Labels) -> Metadata {
    let mirrors = config
        .template
        .iter()
        .map(|m| Mirror {
            artifact: substitute(&m.artifact, identifier, labels),
            signature: substitute(&m.signature, identifier, labels),
        })
        .collect();

    Metadata {
        identifier: identifier.to_string(),
        labels: labels.clone(),
        mirrors,
    }
}

/// Placeholders without a matching label are left as is.
fn substitute(s: &str, identifier: &str, labels: &Labels) -> String {
    let mut out = s.replace("<identifier>", identifier);
    for (name, value) in labels {
        out = out.replace(&format!("<{name}>"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_identifier_and_labels() {
        let config: TemplateConfig = serde_json::from_str(
            r#"{
                "prefix": "example.com",
                "strategy": "template",
                "template": [
                    {
                        "artifact": "https://<identifier>/<version>/<os>-<arch>.aci",
                        "signature": "https://<identifier>/<version>/<os>-<arch>.aci.asc"
                    }
                ]
            }"#,
        )
        .unwrap();
        let l = labels(&[("version", "1.2"), ("os", "linux"), ("arch", "amd64")]);
        let m = render(&config, "example.com/app", &l);

        assert_eq!(m.identifier, "example.com/app");
        assert_eq!(m.labels, l);
        assert_eq!(m.mirrors.len(), 1);
        assert_eq!(
            m.mirrors[0].artifact,
            "https://example.com/app/1.2/linux-amd64.aci"
        );
        assert_eq!(
            m.mirrors[0].signature,
            "https://example.com/app/1.2/linux-amd64.aci.asc"
        );
    }

    #[test]
    fn unknown_placeholder_is_kept() {
        let s = substitute("https://x/<identifier>/<missing>", "app", &Labels::new());
        assert_eq!(s, "https://x/app/<missing>");
    }

    #[test]
    fn every_template_entry_becomes_a_mirror() {
        let config: TemplateConfig = serde_json::from_str(
            r#"{"template": [
                {"artifact": "https://a/<identifier>", "signature": "https://a/<identifier>.sig"},
                {"artifact": "https://b/<identifier>", "signature": "https://b/<identifier>.sig"}
            ]}"#,
        )
        .unwrap();
        let m = render(&config, "app", &Labels::new());
        let artifacts: Vec<_> = m.mirrors.iter().map(|m| m.artifact.as_str()).collect();
        assert_eq!(artifacts, ["https://a/app", "https://b/app"]);
    }

    #[test]
    fn missing_template_renders_no_mirrors() {
        let config: TemplateConfig =
            serde_json::from_str(r#"{"prefix":"*","strategy":"template"}"#).unwrap();
        assert!(render(&config, "app", &Labels::new()).mirrors.is_empty());
    }
}
