//! Shared domain code for the two lorcana_card_display binaries:
//! `fetch_cards` (catalog + image downloader) and `card_search`
//! (interactive fuzzy search that drives the display file).

pub mod cards;
pub mod catalog_fetcher;
pub mod display;
pub mod search;
pub mod utilities;
