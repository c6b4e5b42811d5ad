//! Pokemon type names and the badge colour the web client paints them with.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    Unknown,
}

impl Element {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "normal" => Element::Normal,
            "fire" => Element::Fire,
            "water" => Element::Water,
            "electric" => Element::Electric,
            "grass" => Element::Grass,
            "ice" => Element::Ice,
            "fighting" => Element::Fighting,
            "poison" => Element::Poison,
            "ground" => Element::Ground,
            "flying" => Element::Flying,
            "psychic" => Element::Psychic,
            "bug" => Element::Bug,
            "rock" => Element::Rock,
            "ghost" => Element::Ghost,
            "dragon" => Element::Dragon,
            "dark" => Element::Dark,
            "steel" => Element::Steel,
            "fairy" => Element::Fairy,
            _ => Element::Unknown,
        }
    }

    /// Unrecognised types share the `normal` grey.
    pub fn badge_class(self) -> &'static str {
        match self {
            Element::Normal | Element::Unknown => "bg-gray-400",
            Element::Fire => "bg-red-500",
            Element::Water => "bg-blue-500",
            Element::Electric => "bg-yellow-400",
            Element::Grass => "bg-green-500",
            Element::Ice => "bg-blue-200",
            Element::Fighting => "bg-red-700",
            Element::Poison => "bg-purple-500",
            Element::Ground => "bg-yellow-600",
            Element::Flying => "bg-indigo-400",
            Element::Psychic => "bg-pink-500",
            Element::Bug => "bg-green-400",
            Element::Rock => "bg-yellow-800",
            Element::Ghost => "bg-purple-700",
            Element::Dragon => "bg-indigo-700",
            Element::Dark => "bg-gray-800",
            Element::Steel => "bg-gray-500",
            Element::Fairy => "bg-pink-300",
        }
    }
}

pub fn badges(types: &[String]) -> Vec<&'static str> {
    types
        .iter()
        .map(|name| Element::from_name(name).badge_class())
        .collect()
}
