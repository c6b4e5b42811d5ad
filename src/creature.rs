use serde::{Deserialize, Serialize};

use crate::cursor::PageToken;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureStat {
    pub name: String,
    pub base_value: u16,
}

/// A Pokemon as reported by the catalog. Never mutated locally; the
/// collection keeps the snapshot taken when it was caught.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub id: u32,
    pub height: u16,
    pub weight: u16,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub stats: Vec<CreatureStat>,
    #[serde(default)]
    pub sprite_url: Option<String>,
    pub base_experience: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub name: String,
    pub url: String,
}

/// Detail of one location area: its name and the Pokemon encountered there,
/// in provider order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationArea {
    pub name: String,
    pub encounters: Vec<String>,
}

/// One page of the provider's location listing.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationPage {
    pub locations: Vec<LocationSummary>,
    pub next: Option<PageToken>,
    pub previous: Option<PageToken>,
    pub count: u32,
}
