use web_sys::Document;

use crate::cms::{CmsConfig, DEFAULT_API_VERSION, DEFAULT_DATASET};

pub const DEFAULT_CONTACT_ENDPOINT: &str = "/api/contact";
const META_PREFIX: &str = "scrollfolio:";

/// Runtime settings read from the host page.
///
/// ```html
/// <meta name="scrollfolio:project-id" content="abc123">
/// <meta name="scrollfolio:dataset" content="production">
/// <meta name="scrollfolio:api-version" content="2024-01-01">
/// <meta name="scrollfolio:contact-endpoint" content="/api/contact">
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SiteSettings {
    pub cms: CmsConfig,
    pub contact_endpoint: String,
    /// Cleared by `?cms=0` to force the static content.
    pub cms_enabled: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            cms: CmsConfig::default(),
            contact_endpoint: DEFAULT_CONTACT_ENDPOINT.to_string(),
            cms_enabled: true,
        }
    }
}

impl SiteSettings {
    pub fn from_document(document: &Document, search: &str) -> Self {
        Self::from_lookup(|key| meta_content(document, key), search)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, search: &str) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            cms: CmsConfig {
                project_id: non_empty("project-id").unwrap_or_default(),
                dataset: non_empty("dataset").unwrap_or_else(|| DEFAULT_DATASET.to_string()),
                api_version: non_empty("api-version")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            },
            contact_endpoint: non_empty("contact-endpoint")
                .unwrap_or_else(|| DEFAULT_CONTACT_ENDPOINT.to_string()),
            cms_enabled: !cms_disabled_by_query(search),
        }
    }

    pub fn use_cms(&self) -> bool {
        self.cms_enabled && self.cms.is_configured()
    }
}

fn meta_content(document: &Document, key: &str) -> Option<String> {
    let selector = format!("meta[name=\"{}{}\"]", META_PREFIX, key);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("content"))
}

fn cms_disabled_by_query(search: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "cms=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_page_is_silent() {
        let settings = SiteSettings::from_lookup(|_| None, "");
        assert_eq!(settings, SiteSettings::default());
        assert!(!settings.use_cms());
    }

    #[test]
    fn reads_meta_values() {
        let settings = SiteSettings::from_lookup(
            |key| match key {
                "project-id" => Some(" abc123 ".to_string()),
                "dataset" => Some(String::new()),
                "contact-endpoint" => Some("https://example.com/contact".to_string()),
                _ => None,
            },
            "?foo=1",
        );
        assert_eq!(settings.cms.project_id, "abc123");
        assert_eq!(settings.cms.dataset, "production");
        assert_eq!(settings.contact_endpoint, "https://example.com/contact");
        assert!(settings.use_cms());
    }

    #[test]
    fn query_flag_disables_cms() {
        let settings =
            SiteSettings::from_lookup(|k| (k == "project-id").then(|| "p".to_string()), "?x=1&cms=0");
        assert!(!settings.cms_enabled);
        assert!(!settings.use_cms());
        assert!(!cms_disabled_by_query("?cms=01"));
    }
}
