use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use futures::{stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};

use crate::cards::card::Catalog;
use crate::utilities::constants::{
    CATALOG_FILE_NAME, CATALOG_URL, IMAGES_DIR_NAME, MAX_CONCURRENT_DOWNLOADS, WORK_DIR,
};
use crate::utilities::file_management::{
    download_and_replace_file, download_and_save_file, is_file_written_today,
};

pub struct CatalogFetcher {
    client: reqwest::Client,
    catalog_url: String,
    work_dir: PathBuf,
}

/// Outcome of comparing the image filename sequence against the catalog.
#[derive(Debug, Default, PartialEq)]
pub struct GapReport {
    /// Ids implied by the filename sequence that the catalog does not know
    /// about either. Expected holes (cards pulled from the catalog).
    pub retired: Vec<u32>,
    /// Ids absent on disk but still present in the catalog. These are
    /// failed downloads and need a rerun.
    pub unresolved: Vec<u32>,
}

impl GapReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn has_gaps(&self) -> bool {
        !self.retired.is_empty() || !self.unresolved.is_empty()
    }
}

impl CatalogFetcher {
    pub fn new(
        catalog_url: Option<&str>,
        client: reqwest::Client,
        work_dir: Option<String>,
    ) -> Self {
        CatalogFetcher {
            client,
            catalog_url: catalog_url.unwrap_or(CATALOG_URL).to_string(),
            work_dir: PathBuf::from(work_dir.unwrap_or_else(|| WORK_DIR.to_string())),
        }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.work_dir.join(CATALOG_FILE_NAME)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.work_dir.join(IMAGES_DIR_NAME)
    }

    /// Downloads the catalog unless the local copy was already written
    /// today (UTC). A failed download aborts the run and leaves any
    /// previous catalog file untouched.
    pub async fn ensure_catalog(&self) -> Result<PathBuf, Box<dyn Error>> {
        let path = self.catalog_path();
        if is_file_written_today(&path) {
            info!(
                "Catalog {} is already up to date, skipping download",
                path.display()
            );
            return Ok(path);
        }

        info!("Downloading catalog from {}", self.catalog_url);
        download_and_replace_file(&self.client, &self.catalog_url, &path).await?;
        info!("Saved catalog to {}", path.display());
        Ok(path)
    }

    pub fn load_catalog(&self) -> Result<Catalog, Box<dyn Error>> {
        Catalog::load(&self.catalog_path())
    }

    /// Downloads every card image that is not already on disk. Individual
    /// failures are logged and skipped; the card stays missing until the
    /// next run. Every card advances the progress bar exactly once, so the
    /// count always reaches the total.
    pub async fn download_images(&self, catalog: &Catalog) -> Result<(), Box<dyn Error>> {
        let images_dir = self.images_dir();
        fs::create_dir_all(&images_dir)?;

        let progress = ProgressBar::new(catalog.cards.len() as u64);
        progress.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len}").unwrap());

        stream::iter(&catalog.cards)
            .map(|card| {
                let target = images_dir.join(format!("{}.jpg", card.id));
                let progress = &progress;
                async move {
                    if target.exists() {
                        debug!("{} already exists, skipping download", target.display());
                    } else {
                        debug!("Fetching '{}' from {}", card.full_name, card.images.full);
                        if let Err(e) =
                            download_and_save_file(&self.client, &card.images.full, &target).await
                        {
                            error!("Error downloading image {}.jpg: {}", card.id, e);
                        }
                    }
                    progress.inc(1);
                }
            })
            .buffered(MAX_CONCURRENT_DOWNLOADS) // Limit concurrent downloads
            .collect::<Vec<_>>()
            .await;

        progress.finish();
        info!("Processed {} cards", catalog.cards.len());
        Ok(())
    }

    /// Scans the image directory for `<id>.jpg` files and reports every id
    /// missing from the sequence 1..=max, split by whether the catalog
    /// still lists it.
    pub fn find_missing_images(&self, catalog: &Catalog) -> Result<GapReport, Box<dyn Error>> {
        let mut on_disk = BTreeSet::new();
        for entry in fs::read_dir(self.images_dir())? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(stem) = file_name.strip_suffix(".jpg") {
                if !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()) {
                    if let Ok(id) = stem.parse::<u32>() {
                        on_disk.insert(id);
                    }
                }
            }
        }

        let mut report = GapReport::default();
        let max = match on_disk.iter().next_back() {
            Some(max) => *max,
            None => return Ok(report),
        };

        let catalog_ids: HashSet<u32> = catalog.ids();
        for id in 1..=max {
            if on_disk.contains(&id) {
                continue;
            }
            if catalog_ids.contains(&id) {
                report.unresolved.push(id);
            } else {
                report.retired.push(id);
            }
        }
        Ok(report)
    }
}
