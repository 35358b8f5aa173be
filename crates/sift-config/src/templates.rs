//! Configuration template for `sift init`.
//!
//! The template is stored as a valid TOML file and returned as a commented-out example.

/// Configuration template (valid TOML).
const TEMPLATE: &str = include_str!("../templates/config.toml");

/// Returns the configuration template as a commented-out example.
pub fn config_template() -> String {
    comment_template(TEMPLATE)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{
        Config,
        merge::{ParsedConfig, merge_configs},
        parse::parse_config_str,
    };

    #[test]
    fn template_parses_to_defaults() {
        let raw = parse_config_str(TEMPLATE, Path::new("config.toml")).unwrap();
        let merged = merge_configs(&[ParsedConfig {
            path: "config.toml".into(),
            config: raw,
        }]);
        let defaults = Config::default();
        assert_eq!(merged.engine, defaults.engine);
        assert_eq!(merged.indices, defaults.indices);
        assert_eq!(merged.search, defaults.search);
        assert_eq!(merged.logging, defaults.logging);
    }

    #[test]
    fn commented_template_parses_as_empty() {
        let raw = parse_config_str(&config_template(), Path::new("c.toml")).unwrap();
        assert!(raw.engine.is_none());
        assert!(raw.search.is_none());
    }

    #[test]
    fn comment_template_handles_sections() {
        let input = "# note\n[section]\nkey = \"value\"\n\n";
        assert_eq!(
            comment_template(input),
            "# note\n# [section]\n# key = \"value\"\n\n"
        );
    }
}
