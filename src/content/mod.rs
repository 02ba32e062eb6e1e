//! Portfolio content.
//!
//! [`PortfolioContent`] is loaded once at start-up and shared read-only.
//! A TOML file may replace any top-level section; sections it omits keep
//! the built-in values from [`defaults`].
//!
//! ```toml
//! [hero]
//! name = "Ada Lovelace"
//! tagline = "Analyst"
//! bio = "..."
//! resume_url = "#"
//!
//! [[stats]]
//! label = "Problems Solved"
//! value = 500
//! icon = "✅"
//! ```

pub mod defaults;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioContent {
    pub hero: Hero,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub tools: Vec<Skill>,
    pub projects: Vec<Project>,
    pub profiles: Vec<Link>,
    pub stats: Vec<Stat>,
    pub certifications: Vec<Certification>,
    pub blogs: Vec<Blog>,
    pub contact: Contact,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub tagline: String,
    pub bio: String,
    pub resume_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub period: String,
    pub institution: String,
    pub degree: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub github: String,
    pub demo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// A headline number animated by a count-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: u64,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub title: String,
    pub snippet: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub heading: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    pub credit: String,
    pub links: Vec<Link>,
}

impl Default for PortfolioContent {
    fn default() -> Self {
        defaults::portfolio()
    }
}

impl PortfolioContent {
    /// Load content from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let content: PortfolioContent = toml::from_str(text)?;
        content.validate()?;
        Ok(content)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hero.name.trim().is_empty() {
            return Err(FolioError::config("content: hero.name must not be empty"));
        }
        if self.contact.email.trim().is_empty() {
            return Err(FolioError::config("content: contact.email must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_keeps_defaults() {
        let content = PortfolioContent::from_toml("").unwrap();
        assert_eq!(content, PortfolioContent::default());
    }

    #[test]
    fn test_section_override() {
        let content = PortfolioContent::from_toml(
            r#"
            [[stats]]
            label = "Commits"
            value = 1234
            "#,
        )
        .unwrap();

        assert_eq!(content.stats.len(), 1);
        assert_eq!(content.stats[0].value, 1234);
        assert_eq!(content.stats[0].icon, "");
        assert_eq!(content.hero, defaults::portfolio().hero);
    }

    #[test]
    fn test_dump_round_trips() {
        let content = PortfolioContent::default();
        let text = content.to_toml().unwrap();
        assert!(text.contains("[hero]"));
        assert_eq!(PortfolioContent::from_toml(&text).unwrap(), content);
    }

    #[test]
    fn test_rejects_empty_email() {
        let err = PortfolioContent::from_toml(
            "[contact]\nemail = \"\"\nheading = \"Hi\"\nmessage = \"Write\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("contact.email"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[hero]\nname = \"Ada\"\ntagline = \"Analyst\"\nbio = \"Engines.\"\nresume_url = \"#\""
        )
        .unwrap();

        let content = PortfolioContent::load_from_file(file.path()).unwrap();
        assert_eq!(content.hero.name, "Ada");
        assert!(!content.projects.is_empty());
    }
}
