//! Site content
//!
//! The ordered items each section renders, supplied at mount time. Content
//! lives in a TOML file; [`SiteContent::bundled`] returns the copy shipped
//! with the crate.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUNDLED_SITE: &str = include_str!("../content/site.toml");

/// All content for one page
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteContent {
    #[serde(default)]
    pub hero: HeroContent,
    #[serde(default)]
    pub book: BookContent,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub gallery: Vec<ContentItem>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct HeroContent {
    #[serde(default)]
    pub tagline: String,
    /// Split on whitespace; each word animates on its own
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

impl HeroContent {
    pub fn title_words(&self) -> impl Iterator<Item = &str> {
        self.title.split_whitespace()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct BookContent {
    pub title: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

/// Statistic shown with a count-up animation
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Stat {
    pub label: String,
    pub end: f32,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub suffix: String,
}

/// Gallery item
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentItem {
    /// Stable identity
    pub id: u32,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Client logo shown in the brand carousel
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Brand {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimelineEvent {
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl SiteContent {
    /// Content shipped with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_SITE).context("Failed to parse bundled site content")
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let site: Self = toml::from_str(content)?;
        site.check_ids()?;
        Ok(site)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize site content")
    }

    /// Gallery item identities must be unique
    fn check_ids(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for item in &self.gallery {
            if !seen.insert(item.id) {
                anyhow::bail!("duplicate gallery item id {}", item.id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_content() {
        let site = SiteContent::bundled().unwrap();
        assert_eq!(site.gallery.len(), 6);
        assert_eq!(site.brands.len(), 10);
        assert_eq!(site.timeline.len(), 5);
        assert_eq!(site.book.stats.len(), 3);
        assert_eq!(site.hero.title_words().count(), 2);
        assert_eq!(site.book.stats[1].decimals, 1);
    }

    #[test]
    fn test_minimal_content() {
        let site = SiteContent::from_toml_str(
            r#"
            [[gallery]]
            id = 7
            title = "Keynote"
            category = "Events"
            image = "keynote.jpg"
            "#,
        )
        .unwrap();
        assert_eq!(site.gallery[0].image.as_deref(), Some("keynote.jpg"));
        assert!(site.brands.is_empty());
        assert!(site.hero.title.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = SiteContent::from_toml_str(
            r#"
            [[gallery]]
            id = 1
            title = "A"
            category = "x"

            [[gallery]]
            id = 1
            title = "B"
            category = "x"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let site = SiteContent::bundled().unwrap();
        let text = site.to_toml().unwrap();
        assert_eq!(SiteContent::from_toml_str(&text).unwrap(), site);
    }
}
