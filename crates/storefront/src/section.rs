use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    Catalog,
    About,
    Gallery,
    Contacts,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section {0:?}")]
pub struct ParseSectionError(pub String);

impl Section {
    /// Navigation order.
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Catalog,
        Section::About,
        Section::Gallery,
        Section::Contacts,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Catalog => "catalog",
            Section::About => "about",
            Section::Gallery => "gallery",
            Section::Contacts => "contacts",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Главная",
            Section::Catalog => "Каталог",
            Section::About => "О мастере",
            Section::Gallery => "Галерея",
            Section::Contacts => "Контакты",
        }
    }
}

impl core::fmt::Display for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = ParseSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.slug() == s)
            .ok_or_else(|| ParseSectionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for section in Section::ALL {
            assert_eq!(section.slug().parse::<Section>().unwrap(), section);
        }
        assert!("checkout".parse::<Section>().is_err());
    }

    #[test]
    fn home_is_the_landing_section() {
        assert_eq!(Section::default(), Section::Home);
        assert_eq!(Section::ALL[0], Section::Home);
        assert_eq!(Section::Catalog.label(), "Каталог");
    }
}
