//! Direct file downloader: streams a remote resource to disk.

use std::path::Path;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use crate::artifact::part_path;

use super::client::HttpClient;
use super::error::{DownloadError, HttpError};

/// Downloads `url` to `output_path`, returning bytes written.
///
/// The body is streamed chunk by chunk into a `.part` sibling and renamed
/// into place only after a successful flush, so a failed or interrupted
/// transfer never leaves a file at the final path that the skip gate
/// could mistake for complete. The payload is never buffered whole in
/// memory.
///
/// # Errors
///
/// [`DownloadError::TransferFailed`] on a non-success status or
/// mid-stream network error; [`DownloadError::Io`] on filesystem errors.
#[instrument(skip(client), fields(url = %url))]
pub async fn download_direct(
    client: &HttpClient,
    url: &str,
    output_path: &Path,
) -> Result<u64, DownloadError> {
    debug!(path = %output_path.display(), "starting direct download");

    let response = client
        .get(url)
        .await
        .map_err(|source| DownloadError::transfer_failed(url, source))?;

    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::io(parent, e))?;
    }

    let temp = part_path(output_path);
    match stream_to_file(response, url, &temp).await {
        Ok(bytes) => {
            if let Err(e) = tokio::fs::rename(&temp, output_path).await {
                let _ = tokio::fs::remove_file(&temp).await;
                return Err(DownloadError::io(output_path, e));
            }
            info!(path = %output_path.display(), bytes, "download complete");
            Ok(bytes)
        }
        Err(err) => {
            debug!(path = %temp.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&temp).await;
            Err(err)
        }
    }
}

/// Streams the response body into `temp`, returning bytes written.
async fn stream_to_file(
    response: reqwest::Response,
    url: &str,
    temp: &Path,
) -> Result<u64, DownloadError> {
    let file = File::create(temp)
        .await
        .map_err(|e| DownloadError::io(temp, e))?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result
            .map_err(|e| DownloadError::transfer_failed(url, HttpError::from_request(url, e)))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(temp, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(temp, e))?;

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::artifact::PART_SUFFIX;

    use super::*;

    #[tokio::test]
    async fn test_download_direct_writes_exact_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"col\n1\n2\n3\n"))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("data.csv");
        let client = HttpClient::new();

        let bytes = download_direct(&client, &format!("{}/data.csv", server.uri()), &output)
            .await
            .unwrap();

        assert_eq!(bytes, 10);
        assert_eq!(std::fs::read(&output).unwrap(), b"col\n1\n2\n3\n");
    }

    #[tokio::test]
    async fn test_download_direct_creates_missing_parent_dirs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x"))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("ds-1_Title").join("data.csv");
        let client = HttpClient::new();

        download_direct(&client, &format!("{}/data.csv", server.uri()), &output)
            .await
            .unwrap();
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_download_direct_http_error_leaves_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.csv"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("missing.csv");
        let client = HttpClient::new();

        let result =
            download_direct(&client, &format!("{}/missing.csv", server.uri()), &output).await;

        match result {
            Err(DownloadError::TransferFailed {
                source: HttpError::Status { status: 404, .. },
                ..
            }) => {}
            other => panic!("expected TransferFailed 404, got: {other:?}"),
        }

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
        assert!(entries.is_empty(), "no files should remain: {entries:?}");
    }

    #[tokio::test]
    async fn test_download_direct_stream_error_removes_part_file() {
        // Read timeout mid-body: the .part file must be cleaned up and the
        // final path must never exist.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow.csv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"data")
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("slow.csv");
        let client = HttpClient::new_with_timeouts(30, 1);

        let result = download_direct(&client, &format!("{}/slow.csv", server.uri()), &output).await;
        assert!(result.is_err(), "expected timeout or network error");
        assert!(!output.exists(), "final path must not exist");

        let part = temp_dir.path().join(format!("slow.csv{PART_SUFFIX}"));
        assert!(!part.exists(), "part file must be cleaned up");
    }
}
