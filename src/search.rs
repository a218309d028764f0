use fuzzywuzzy::fuzz;
use log::debug;

use crate::cards::card::{Card, Catalog};
use crate::utilities::constants::{MATCH_LIMIT, MIN_MATCH_SCORE};

/// Scoring strategy for one matching pass. Both delegate to fuzzywuzzy and
/// report on a 0..=100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scorer {
    /// Order-insensitive token agreement. The strict first pass.
    TokenSet,
    /// Substring-tolerant token overlap. The looser fallback pass.
    PartialTokenSort,
}

impl Scorer {
    pub fn score(&self, query: &str, candidate: &str) -> u8 {
        match self {
            Scorer::TokenSet => fuzz::token_set_ratio(query, candidate, true, true),
            Scorer::PartialTokenSort => fuzz::partial_token_sort_ratio(query, candidate, true, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredName {
    pub name: String,
    pub score: u8,
}

pub struct SearchOutcome {
    /// Surviving candidates, best first.
    pub matches: Vec<ScoredName>,
    /// The selected card, after enchanted variant substitution.
    pub card: Card,
}

pub struct CardSearcher {
    catalog: Catalog,
    names: Vec<String>,
}

impl CardSearcher {
    pub fn new(catalog: Catalog) -> Self {
        let names = catalog.unique_simple_names();
        debug!("Search universe holds {} names", names.len());
        CardSearcher { catalog, names }
    }

    /// Scores every known name with the given strategy and keeps at most
    /// MATCH_LIMIT candidates at or above MIN_MATCH_SCORE. Equal scores
    /// rank the shorter name first.
    pub fn extract_matches(&self, query: &str, scorer: Scorer) -> Vec<ScoredName> {
        let mut matches: Vec<ScoredName> = self
            .names
            .iter()
            .map(|name| ScoredName {
                name: name.clone(),
                score: scorer.score(query, name),
            })
            .filter(|candidate| candidate.score >= MIN_MATCH_SCORE)
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.name.len().cmp(&b.name.len()))
        });
        matches.truncate(MATCH_LIMIT);
        matches
    }

    /// Two-pass search: strict token-set scoring first, the looser partial
    /// token-sort scoring only when the first pass comes up empty. Returns
    /// None when neither pass clears the score threshold.
    pub fn search(&self, query: &str) -> Option<SearchOutcome> {
        let mut matches = self.extract_matches(query, Scorer::TokenSet);
        if matches.is_empty() {
            debug!(
                "No token-set match for '{}', retrying with partial token sort",
                query
            );
            matches = self.extract_matches(query, Scorer::PartialTokenSort);
        }

        let best = self.resolve(&matches.first()?.name)?;
        Some(SearchOutcome {
            card: best.clone(),
            matches,
        })
    }

    /// First catalog card carrying the winning simple name; enchanted
    /// variants replace their base card.
    fn resolve(&self, simple_name: &str) -> Option<&Card> {
        let card = self.catalog.find_by_simple_name(simple_name)?;
        Some(self.catalog.resolve_enchanted(card))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::CardImages;

    fn card(id: u32, simple_name: &str, enchanted_id: Option<u32>) -> Card {
        Card {
            id,
            simple_name: simple_name.to_string(),
            full_name: simple_name.to_string(),
            full_text: String::new(),
            enchanted_id,
            images: CardImages { full: String::new() },
        }
    }

    fn searcher_of(cards: Vec<Card>) -> CardSearcher {
        CardSearcher::new(Catalog { cards })
    }

    #[test]
    fn test_equal_scores_prefer_the_shorter_name() {
        let searcher = searcher_of(vec![
            card(1, "elsa of arendelle", None),
            card(2, "elsa", None),
        ]);

        // Both names agree on every query token, so both score 100.
        let outcome = searcher.search("elsa").unwrap();
        assert_eq!(outcome.matches[0].name, "elsa");
        assert_eq!(outcome.card.id, 2);
    }

    #[test]
    fn test_enchanted_variant_replaces_the_matched_card() {
        let searcher = searcher_of(vec![
            card(1, "elsa snow queen", Some(42)),
            card(42, "elsa snow queen", None),
        ]);

        let outcome = searcher.search("elsa snow queen").unwrap();
        assert_eq!(outcome.card.id, 42);
    }

    #[test]
    fn test_second_pass_catches_partial_token_queries() {
        let searcher = searcher_of(vec![card(1, "elsa of arendelle", None)]);

        // "arendel" shares no whole token with the name, so the token-set
        // pass scores below the threshold, while the partial pass matches
        // the token prefix.
        assert!(searcher.extract_matches("arendel", Scorer::TokenSet).is_empty());

        let outcome = searcher.search("arendel").unwrap();
        assert_eq!(outcome.card.id, 1);
    }

    #[test]
    fn test_unrelated_query_matches_nothing() {
        let searcher = searcher_of(vec![card(1, "elsa of arendelle", None)]);

        assert!(searcher.search("xyzzyplugh").is_none());
    }

    #[test]
    fn test_candidate_list_is_capped() {
        let cards = (1..=20)
            .map(|id| card(id, &format!("elsa variant number {}", id), None))
            .collect();
        let searcher = searcher_of(cards);

        let matches = searcher.extract_matches("elsa variant number", Scorer::TokenSet);
        assert_eq!(matches.len(), MATCH_LIMIT);
    }

    #[test]
    fn test_shared_name_resolves_to_first_catalog_entry() {
        let searcher = searcher_of(vec![
            card(7, "olaf friendly snowman", None),
            card(8, "olaf friendly snowman", None),
        ]);

        let outcome = searcher.search("olaf friendly snowman").unwrap();
        assert_eq!(outcome.card.id, 7);
    }
}
