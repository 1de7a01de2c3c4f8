use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, warn};

use crate::figma::client::FigmaClient;
use crate::figma::query::is_valid_image_ref;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadedImage {
    pub image_ref: String,
    pub path: PathBuf,
    pub bytes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageDownloadReport {
    pub downloaded: Vec<DownloadedImage>,
    /// Refs the image-fills endpoint had no URL for.
    pub missing: Vec<String>,
    /// Refs that are not plain alphanumeric hashes and were never fetched.
    pub rejected: Vec<String>,
}

/// Refs that pair with a URL, refs without one, and refs unsafe to use as a file name.
#[derive(Debug, Default, PartialEq)]
struct RefMatch {
    found: Vec<(String, String)>,
    missing: Vec<String>,
    rejected: Vec<String>,
}

/// File name an image fill is stored under; the markup refers to the same name.
pub fn image_file_name(image_ref: &str) -> String {
    format!("Image_{image_ref}.png")
}

/// Pair each ref with its download URL, in ref order.
fn match_refs(refs: &BTreeSet<String>, urls: &HashMap<String, String>) -> RefMatch {
    let mut matched = RefMatch::default();
    for image_ref in refs {
        if !is_valid_image_ref(image_ref) {
            warn!(image_ref = %image_ref, "skipping malformed image ref");
            matched.rejected.push(image_ref.clone());
            continue;
        }
        match urls.get(image_ref).filter(|u| !u.is_empty()) {
            Some(url) => matched.found.push((image_ref.clone(), url.clone())),
            None => matched.missing.push(image_ref.clone()),
        }
    }
    matched
}

/// Fetch image-fill URLs for `file_key` and save every ref in `refs` under `dir`.
pub async fn download_images(
    client: &FigmaClient,
    file_key: &str,
    refs: &BTreeSet<String>,
    dir: &Path,
    concurrency: usize,
) -> Result<ImageDownloadReport> {
    if refs.is_empty() {
        return Ok(ImageDownloadReport::default());
    }

    let fills = client.get_image_fills(file_key).await?;
    let RefMatch {
        found,
        missing,
        rejected,
    } = match_refs(refs, &fills.meta.images);
    for image_ref in &missing {
        warn!(image_ref = %image_ref, "no download URL for image fill");
    }

    std::fs::create_dir_all(dir)?;
    let mut downloaded: Vec<DownloadedImage> = stream::iter(found)
        .map(|(image_ref, url)| async move {
            let bytes = client.download_image(&url).await?;
            let path = dir.join(image_file_name(&image_ref));
            tokio::fs::write(&path, &bytes).await?;
            debug!(image_ref = %image_ref, bytes = bytes.len(), "saved image fill");
            Ok::<_, crate::FigcoError>(DownloadedImage {
                image_ref,
                path,
                bytes: bytes.len(),
            })
        })
        .buffer_unordered(concurrency.max(1))
        .try_collect()
        .await?;
    downloaded.sort_by(|a, b| a.image_ref.cmp(&b.image_ref));

    Ok(ImageDownloadReport {
        downloaded,
        missing,
        rejected,
    })
}
