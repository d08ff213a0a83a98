//! The transient per-platform link set returned by the resolver.

use serde::{Deserialize, Serialize};

/// External platforms a book or chapter can link out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Hebrewbooks,
    ChabadOrg,
    Lahak,
    Chabadlibrary,
    Sefaria,
}

impl Platform {
    /// Every supported platform, in response-key order.
    pub const ALL: [Platform; 5] = [
        Platform::Hebrewbooks,
        Platform::ChabadOrg,
        Platform::Lahak,
        Platform::Chabadlibrary,
        Platform::Sefaria,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hebrewbooks => "hebrewbooks",
            Self::ChabadOrg => "chabad_org",
            Self::Lahak => "lahak",
            Self::Chabadlibrary => "chabadlibrary",
            Self::Sefaria => "sefaria",
        }
    }
}

/// Ready-to-use deep links, one slot per platform.
///
/// Not persisted. A `None` entry means the book or chapter lacks the
/// identifier that platform needs; the field itself is always present so
/// consumers never have to guard against missing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformLinks {
    pub hebrewbooks: Option<String>,
    pub chabad_org: Option<String>,
    pub lahak: Option<String>,
    pub chabadlibrary: Option<String>,
    pub sefaria: Option<String>,
}

impl PlatformLinks {
    pub fn get(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Hebrewbooks => self.hebrewbooks.as_deref(),
            Platform::ChabadOrg => self.chabad_org.as_deref(),
            Platform::Lahak => self.lahak.as_deref(),
            Platform::Chabadlibrary => self.chabadlibrary.as_deref(),
            Platform::Sefaria => self.sefaria.as_deref(),
        }
    }

    pub fn set(&mut self, platform: Platform, url: Option<String>) {
        let slot = match platform {
            Platform::Hebrewbooks => &mut self.hebrewbooks,
            Platform::ChabadOrg => &mut self.chabad_org,
            Platform::Lahak => &mut self.lahak,
            Platform::Chabadlibrary => &mut self.chabadlibrary,
            Platform::Sefaria => &mut self.sefaria,
        };
        *slot = url;
    }

    /// Platforms that resolved to a usable link.
    pub fn available(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.get(*p).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_serialize_even_when_absent() {
        let json = serde_json::to_value(PlatformLinks::default()).unwrap();
        for platform in Platform::ALL {
            assert!(json.get(platform.as_str()).is_some(), "{}", platform.as_str());
            assert!(json[platform.as_str()].is_null());
        }
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut links = PlatformLinks::default();
        links.set(Platform::Sefaria, Some("https://www.sefaria.org/Tanya".into()));
        assert_eq!(links.get(Platform::Sefaria), Some("https://www.sefaria.org/Tanya"));
        assert_eq!(links.available(), vec![Platform::Sefaria]);
    }
}
