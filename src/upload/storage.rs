use log::{debug, error};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

use crate::api::UploadSignature;
use crate::errors::UploadError;
use crate::file_utils::FileManager;

/// What the storage provider returns for each accepted POST
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageUploadResponse {
    /// Final asset URL; chunked uploads may only send it with the last range
    #[serde(default)]
    pub secure_url: Option<String>,

    /// Whether the provider considers the asset complete
    #[serde(default)]
    pub done: Option<bool>,
}

impl StorageUploadResponse {
    /// The trimmed `secure_url`, if one was returned and is not blank
    pub fn secure_url(&self) -> Option<String> {
        self.secure_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}

/// Sends signed multipart POSTs to the storage provider
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: Client,
}

impl StorageClient {
    /// Create a storage client with the given request timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// POST one payload with the signature fields.
    ///
    /// `headers` carries the range headers for chunked uploads and is empty
    /// for single-shot uploads. A non-success status is turned into
    /// `UploadError::Rejected` with the provider's message.
    pub async fn post(
        &self,
        signature: &UploadSignature,
        data: Vec<u8>,
        file_name: &str,
        headers: &[(&str, String)],
        label: &str,
    ) -> Result<StorageUploadResponse, UploadError> {
        let mut form = Form::new().part("file", Part::bytes(data).file_name(file_name.to_string()));
        for (name, value) in signature.form_fields() {
            form = form.text(name, value);
        }

        let mut request = self.client.post(&signature.upload_url).multipart(form);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_storage_message(status, &body);
            error!("{} upload rejected ({}): {}", label, status, message);
            return Err(UploadError::Rejected {
                label: label.to_string(),
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<StorageUploadResponse>()
            .await
            .map_err(|e| UploadError::ParseError(e.to_string()))?;
        debug!("{} upload accepted (done: {:?})", label, parsed.done);
        Ok(parsed)
    }

    /// Upload a whole file in one request and return its `secure_url`
    pub async fn upload_whole_file(
        &self,
        path: &Path,
        signature: &UploadSignature,
        label: &str,
    ) -> Result<String, UploadError> {
        let data = tokio::fs::read(path).await?;
        let file_name = FileManager::file_name(path);

        let response = self.post(signature, data, &file_name, &[], label).await?;
        response
            .secure_url()
            .ok_or_else(|| UploadError::MissingSecureUrl(label.to_string()))
    }
}

/// Pull a readable message out of a rejected upload.
///
/// A JSON body yields its `{"error": {"message"}}` or the bare status code;
/// a non-JSON body yields its trimmed text, then the bare status code.
pub fn extract_storage_message(status: StatusCode, body: &str) -> String {
    let fallback = format!("status {}", status.as_u16());
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json["error"]["message"]
            .as_str()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map_or(fallback, str::to_string),
        Err(_) => {
            let text = body.trim();
            if text.is_empty() { fallback } else { text.to_string() }
        }
    }
}
