pub const CATALOG_URL: &str = "https://lorcanajson.org/files/current/en/allCards.json";

pub const WORK_DIR: &str = "work";
pub const CATALOG_FILE_NAME: &str = "allCards.json";
pub const IMAGES_DIR_NAME: &str = "images";
pub const DISPLAY_DIR_NAME: &str = "display";
pub const DISPLAY_FILE_NAME: &str = "card.jpg";

pub const MAX_CONCURRENT_DOWNLOADS: usize = 5;

pub const MIN_MATCH_SCORE: u8 = 70;
pub const MATCH_LIMIT: usize = 10;

/// Smallest byte sequence that still parses as a JPEG (SOI marker + EOI marker).
pub const BLANK_JPEG: [u8; 4] = [0xff, 0xd8, 0xff, 0xd9];
