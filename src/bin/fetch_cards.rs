use std::error::Error;

use log::info;
use lorcana_card_display::catalog_fetcher::CatalogFetcher;
use lorcana_card_display::utilities::config::CONFIG;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let fetcher = CatalogFetcher::new(
        Some(&CONFIG.catalog_url),
        reqwest::Client::new(),
        Some(CONFIG.work_dir.clone()),
    );

    // A failed catalog download aborts the run before any image is touched.
    fetcher.ensure_catalog().await?;

    let catalog = fetcher.load_catalog()?;
    info!("Catalog loaded with {} cards", catalog.cards.len());

    fetcher.download_images(&catalog).await?;

    let report = fetcher.find_missing_images(&catalog)?;
    if !report.has_gaps() {
        println!("No gaps in filename sequence.");
    } else if report.is_complete() {
        println!(
            "SUCCESS: all filename gaps ({:?}) are ids the catalog no longer lists.",
            report.retired
        );
    } else {
        println!(
            "MISSING FILES: still listed in the catalog but absent on disk: {:?}",
            report.unresolved
        );
    }

    Ok(())
}
