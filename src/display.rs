use std::error::Error;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::utilities::constants::{BLANK_JPEG, DISPLAY_FILE_NAME};

/// The single file external viewers watch. Every update is staged in a
/// temporary file inside the same directory and renamed over the slot, so
/// a reader never observes a half-written image.
pub struct DisplaySlot {
    display_dir: PathBuf,
}

impl DisplaySlot {
    pub fn new(display_dir: impl Into<PathBuf>) -> Result<Self, Box<dyn Error>> {
        let display_dir = display_dir.into();
        fs::create_dir_all(&display_dir)?;
        Ok(DisplaySlot { display_dir })
    }

    pub fn path(&self) -> PathBuf {
        self.display_dir.join(DISPLAY_FILE_NAME)
    }

    /// Copies the image at `image_path` over the slot.
    pub fn publish(&self, image_path: &Path) -> Result<(), Box<dyn Error>> {
        let mut temp_file = NamedTempFile::new_in(&self.display_dir)?;
        let mut source = File::open(image_path)?;
        io::copy(&mut source, temp_file.as_file_mut())?;
        temp_file.persist(self.path())?;

        debug!("Published {} to {}", image_path.display(), self.path().display());
        Ok(())
    }

    /// Resets the slot to a minimal blank JPEG.
    pub fn clear(&self) -> Result<(), Box<dyn Error>> {
        let mut temp_file = NamedTempFile::new_in(&self.display_dir)?;
        io::Write::write_all(temp_file.as_file_mut(), &BLANK_JPEG)?;
        temp_file.persist(self.path())?;

        debug!("Cleared {}", self.path().display());
        Ok(())
    }
}
