use serde::Deserialize;

/// Presentation config loaded from `cgpa.yaml`. Everything here is optional:
/// the calculator must come up with zero setup, so a missing file or missing
/// keys fall back to defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub header: Option<String>,
    // Optional path to an ASCII-art logo rendered in the top banner
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "default_true")]
    pub animations: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            header: Some("CGPA Calculator".to_string()),
            logo: None,
            animations: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let cfg: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert!(cfg.header.is_none());
        assert!(cfg.logo.is_none());
        assert!(cfg.animations);
    }

    #[test]
    fn full_yaml_overrides_defaults() {
        let cfg: AppConfig = serde_yaml::from_str(
            "header: My University\nlogo: logo.txt\nanimations: false\n",
        )
        .unwrap();
        assert_eq!(cfg.header.as_deref(), Some("My University"));
        assert_eq!(cfg.logo.as_deref(), Some("logo.txt"));
        assert!(!cfg.animations);
    }
}
