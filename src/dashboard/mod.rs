use serde::Serialize;
use std::fmt;

pub const TITLE: &str = "AWS Saas Boost Modules";

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ModuleStatus {
    pub name: String,
    pub enabled: bool,
}

/// Summary of the optional SaaS Boost modules shown on the dashboard.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct InstalledExtensions {
    pub title: String,
    pub modules: Vec<ModuleStatus>,
}

// Fixed flags; no per-tenant module status is looked up.
const MODULES: [(&str, bool); 2] = [("Billing", true), ("Metrics", false)];

/// Build the installed-extensions summary. Props are accepted but not read.
pub fn installed_extensions<P>(_props: P) -> InstalledExtensions {
    InstalledExtensions {
        title: TITLE.to_string(),
        modules: MODULES
            .iter()
            .map(|(name, enabled)| ModuleStatus {
                name: (*name).to_string(),
                enabled: *enabled,
            })
            .collect(),
    }
}

impl fmt::Display for InstalledExtensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for m in &self.modules {
            let mark = if m.enabled { "[x]" } else { "[ ]" };
            writeln!(f, "  {} {}", mark, m.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fixed_rows(summary: &InstalledExtensions) {
        assert_eq!(summary.title, TITLE);
        assert_eq!(
            summary.modules,
            vec![
                ModuleStatus {
                    name: "Billing".into(),
                    enabled: true
                },
                ModuleStatus {
                    name: "Metrics".into(),
                    enabled: false
                },
            ]
        );
    }

    #[test]
    fn props_are_ignored() {
        assert_fixed_rows(&installed_extensions(()));
        assert_fixed_rows(&installed_extensions(serde_json::json!({"metrics": true})));
        assert_fixed_rows(&installed_extensions(Some("tenant-1")));
    }

    #[test]
    fn text_rendering() {
        let text = installed_extensions(()).to_string();
        assert_eq!(
            text,
            "AWS Saas Boost Modules\n  [x] Billing\n  [ ] Metrics\n"
        );
    }

    #[test]
    fn json_rendering() {
        let v = serde_json::to_value(installed_extensions(())).unwrap();
        assert_eq!(v["title"], TITLE);
        assert_eq!(v["modules"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(v["modules"][0]["name"], "Billing");
        assert_eq!(v["modules"][0]["enabled"], true);
        assert_eq!(v["modules"][1]["name"], "Metrics");
        assert_eq!(v["modules"][1]["enabled"], false);
    }
}
