//! League catalog: selectable league keys, display names, and the alias map
//! used to canonicalize the league spellings bookmakers report.

use std::collections::HashMap;

/// One selectable league.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub key: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    /// Rank used to order the catalog listing; lower is more prominent.
    pub priority: u8,
}

const LEAGUES: &[League] = &[
    League {
        key: "premier-league",
        name: "Premier League",
        country: "EN",
        priority: 1,
    },
    League {
        key: "bundesliga-de",
        name: "German Bundesliga",
        country: "DE",
        priority: 2,
    },
    League {
        key: "la-liga",
        name: "La Liga",
        country: "ES",
        priority: 3,
    },
    League {
        key: "serie-a",
        name: "Serie A",
        country: "IT",
        priority: 4,
    },
    League {
        key: "ligue-1",
        name: "Ligue 1",
        country: "FR",
        priority: 5,
    },
    League {
        key: "bundesliga",
        name: "Austrian Bundesliga",
        country: "AT",
        priority: 6,
    },
    League {
        key: "2-liga",
        name: "Austrian 2. Liga",
        country: "AT",
        priority: 7,
    },
];

/// Alternative spellings bookmakers use, mapped to canonical display names.
const ALIASES: &[(&str, &str)] = &[
    ("österreichische bundesliga", "Austrian Bundesliga"),
    ("öbl", "Austrian Bundesliga"),
    ("2. liga", "Austrian 2. Liga"),
    ("1. bundesliga", "German Bundesliga"),
    ("bundesliga", "German Bundesliga"),
    ("epl", "Premier League"),
    ("english premier league", "Premier League"),
    ("primera división", "La Liga"),
    ("laliga", "La Liga"),
    ("laliga santander", "La Liga"),
    ("serie a tim", "Serie A"),
    ("ligue 1 uber eats", "Ligue 1"),
];

/// Catalog of selectable leagues plus the alias canonicalization map.
#[derive(Debug, Clone)]
pub struct LeagueCatalog {
    aliases: HashMap<&'static str, &'static str>,
}

impl LeagueCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            aliases: ALIASES.iter().copied().collect(),
        }
    }

    /// All selectable leagues, ordered by priority.
    #[must_use]
    pub fn leagues(&self) -> Vec<League> {
        let mut leagues = LEAGUES.to_vec();
        leagues.sort_by_key(|l| l.priority);
        leagues
    }

    /// Display name for a league filter key, if the key is known.
    #[must_use]
    pub fn display_name(&self, key: &str) -> Option<&'static str> {
        LEAGUES.iter().find(|l| l.key == key).map(|l| l.name)
    }

    /// Canonicalize a league name as reported by a bookmaker.
    ///
    /// Known aliases map to the canonical display name; anything else comes
    /// back trimmed but otherwise untouched.
    #[must_use]
    pub fn canonicalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self.aliases.get(trimmed.to_lowercase().as_str()) {
            Some(canonical) => (*canonical).to_string(),
            None => trimmed.to_string(),
        }
    }
}

impl Default for LeagueCatalog {
    fn default() -> Self {
        Self::new()
    }
}
