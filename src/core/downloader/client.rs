use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{SetupError, SetupResult};

/// Streaming downloader that never exposes a partially written file at the
/// destination path.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` to `dest`, returning the number of bytes written.
    ///
    /// The body is streamed into a temp file next to `dest`, unique to this
    /// call, and renamed over `dest` only once the whole response has been
    /// synced. Concurrent downloads of the same `dest` never share a temp
    /// file, so the last rename wins with a complete body. On failure the
    /// temp file is removed and `dest` is left untouched.
    pub async fn download_file(&self, url: &str, dest: &Path) -> SetupResult<u64> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SetupError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SetupError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total_bytes = response.content_length();
        info!(
            "Downloading {} ({} bytes)",
            url,
            total_bytes.map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );

        let partial = partial_path(dest);
        let written = match stream_to_file(response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, dest)
            .await
            .map_err(|e| SetupError::Io {
                path: dest.to_path_buf(),
                source: e,
            })?;

        debug!("Downloaded: {} -> {:?} ({} bytes)", url, dest, written);
        Ok(written)
    }
}

async fn stream_to_file(response: reqwest::Response, path: &Path) -> SetupResult<u64> {
    let io_err = |e| SetupError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let mut file = tokio::fs::File::create(path).await.map_err(io_err)?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.map_err(io_err)?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    Ok(written)
}

/// `.<file name>.<uuid>.part` in the directory of `dest`.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(
        dest.file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("download")),
    );
    name.push(format!(".{}.part", Uuid::new_v4().simple()));
    dest.with_file_name(name)
}
