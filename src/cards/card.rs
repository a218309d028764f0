use std::collections::HashSet;
use std::error::Error;
use std::path::Path;

use serde::Deserialize;

use crate::utilities::file_management::load_from_json_file;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardImages {
    pub full: String,
}

/// One card record from the lorcanajson catalog. Only the fields the two
/// binaries use are kept; everything else in the document is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u32,
    pub simple_name: String,
    pub full_name: String,
    #[serde(default)]
    pub full_text: String,
    #[serde(default)]
    pub enchanted_id: Option<u32>,
    pub images: CardImages,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub cards: Vec<Card>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        load_from_json_file(path)
    }

    /// Search universe for the matcher: every distinct simple name, in
    /// catalog order. Variants sharing a name appear once.
    pub fn unique_simple_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.cards
            .iter()
            .filter(|card| seen.insert(card.simple_name.as_str()))
            .map(|card| card.simple_name.clone())
            .collect()
    }

    /// First card in catalog order with this simple name. Shared names
    /// resolve to whichever card the catalog lists first.
    pub fn find_by_simple_name(&self, simple_name: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.simple_name == simple_name)
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Follows the enchanted variant link when the card has one that
    /// resolves; otherwise hands back the card itself.
    pub fn resolve_enchanted<'a>(&'a self, card: &'a Card) -> &'a Card {
        card.enchanted_id
            .and_then(|id| self.find_by_id(id))
            .unwrap_or(card)
    }

    pub fn ids(&self) -> HashSet<u32> {
        self.cards.iter().map(|card| card.id).collect()
    }
}
