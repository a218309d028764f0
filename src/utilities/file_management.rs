use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Fetches `url` and writes the whole response body to `path`, creating
/// parent directories as needed.
pub async fn download_and_save_file(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.bytes().await?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &body)?;
    Ok(())
}

/// Like [`download_and_save_file`], but stages the body in a temporary
/// sibling file and renames it into place. A failed transfer never leaves
/// a truncated file at `path`, and any previous file stays intact.
pub async fn download_and_replace_file(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.bytes().await?;

    let parent = path.parent().ok_or("Target path has no parent directory")?;
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(&body)?;
    temp_file.persist(path)?;
    Ok(())
}

pub fn load_from_json_file<T>(path: &Path) -> Result<T, Box<dyn Error>>
where
    T: serde::de::DeserializeOwned,
{
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// True if the file exists and its modification date (UTC) is today's date.
pub fn is_file_written_today(path: &Path) -> bool {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map(|modified| {
            let modified: DateTime<Utc> = modified.into();
            modified.format("%Y-%m-%d").to_string() == Utc::now().format("%Y-%m-%d").to_string()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_freshly_written_file_counts_as_today() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("allCards.json");
        fs::write(&path, "{}").unwrap();

        assert!(is_file_written_today(&path));
    }

    #[test]
    fn test_missing_file_is_not_fresh() {
        let temp_dir = tempdir().unwrap();
        assert!(!is_file_written_today(&temp_dir.path().join("nope.json")));
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, r#"{"cards": []}"#).unwrap();

        let value: Value = load_from_json_file(&path).unwrap();
        assert!(value["cards"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_file_keeps_old_content_on_http_error() {
        let mut server = std::thread::spawn(|| mockito::Server::new())
            .join()
            .unwrap();
        let mock = server
            .mock("GET", "/allCards.json")
            .with_status(500)
            .create();

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("allCards.json");
        fs::write(&path, "old catalog").unwrap();

        let url = format!("{}/allCards.json", server.url());
        let result = download_and_replace_file(&reqwest::Client::new(), &url, &path).await;

        mock.assert();
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old catalog");
    }

    #[tokio::test]
    async fn test_replace_file_writes_body() {
        let mut server = std::thread::spawn(|| mockito::Server::new())
            .join()
            .unwrap();
        let mock = server
            .mock("GET", "/allCards.json")
            .with_status(200)
            .with_body(r#"{"cards": []}"#)
            .create();

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("allCards.json");

        let url = format!("{}/allCards.json", server.url());
        download_and_replace_file(&reqwest::Client::new(), &url, &path)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"cards": []}"#);
    }
}
