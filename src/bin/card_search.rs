use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;

use log::error;
use lorcana_card_display::cards::card::Catalog;
use lorcana_card_display::display::DisplaySlot;
use lorcana_card_display::search::{CardSearcher, SearchOutcome};
use lorcana_card_display::utilities::config::CONFIG;
use lorcana_card_display::utilities::constants::{
    CATALOG_FILE_NAME, DISPLAY_DIR_NAME, IMAGES_DIR_NAME,
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let work_dir = Path::new(&CONFIG.work_dir);
    let catalog = Catalog::load(&work_dir.join(CATALOG_FILE_NAME))?;
    let images_dir = work_dir.join(IMAGES_DIR_NAME);
    let slot = DisplaySlot::new(work_dir.join(DISPLAY_DIR_NAME))?;

    let searcher = CardSearcher::new(catalog);

    // Start every session from a blank display.
    slot.clear()?;

    let stdin = io::stdin();
    loop {
        print!("\nCard search: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();

        if query.is_empty() {
            slot.clear()?;
            println!("Cleared card display with a blank JPEG.");
            continue;
        }

        match searcher.search(query) {
            Some(outcome) => show_match(&outcome, &images_dir, &slot),
            None => println!("\nNO GOOD MATCH FOUND. TRY AGAIN."),
        }
    }

    Ok(())
}

fn show_match(outcome: &SearchOutcome, images_dir: &Path, slot: &DisplaySlot) {
    println!("\nTop Matches:");
    for candidate in &outcome.matches {
        println!("- {} ({}%)", candidate.name, candidate.score);
    }

    let card = &outcome.card;
    println!(
        "\nBest match selected: {} - {}\nText: {}",
        card.id, card.full_name, card.full_text
    );

    let image_path = images_dir.join(format!("{}.jpg", card.id));
    if !image_path.exists() {
        println!("\nCard image not found.");
        return;
    }

    match slot.publish(&image_path) {
        Ok(()) => println!("\nUpdated display file: {} - {}", card.id, card.full_name),
        // A failed copy keeps the previous card on screen; the session goes on.
        Err(e) => error!("Failed to update display file: {}", e),
    }
}
