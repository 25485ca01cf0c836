//! Cloudinary-compatible remote object stage.

use crate::{ObjectStage, ObjectStageConfig, RemoteObjectHandle, SignatureAlgorithm, StagedFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use tracing::instrument;
use veracity_core::MediaKind;
use veracity_error::{TransferError, TransferErrorKind, VeracityResult};

/// Signed-upload client for a Cloudinary-style media API.
#[derive(Debug, Clone)]
pub struct CloudinaryStage {
    config: ObjectStageConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: Option<String>,
    secure_url: Option<String>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: Option<String>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl CloudinaryStage {
    /// Create a stage client.
    #[instrument(skip_all, fields(cloud_name = %config.cloud_name, folder = %config.folder))]
    pub fn new(config: ObjectStageConfig, client: reqwest::Client) -> Self {
        tracing::debug!("Creating remote object stage client");
        Self { config, client }
    }

    /// The stage configuration.
    pub fn config(&self) -> &ObjectStageConfig {
        &self.config
    }

    fn endpoint(&self, kind: MediaKind, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name,
            kind.as_str(),
            action
        )
    }

    /// Request signature over the alphabetically sorted parameters.
    ///
    /// Hex digest of `key=value&...` followed by the API secret.
    pub(crate) fn signature(
        params: &[(&str, String)],
        secret: &str,
        algorithm: SignatureAlgorithm,
    ) -> String {
        let mut sorted: Vec<&(&str, String)> = params.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let joined = sorted
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        match algorithm {
            SignatureAlgorithm::Sha1 => hex_digest::<Sha1>(&joined, secret),
            SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(&joined, secret),
        }
    }

    fn sign(&self, params: &[(&str, String)]) -> String {
        Self::signature(params, &self.config.api_secret, self.config.signature_algorithm)
    }

    fn public_id() -> String {
        format!(
            "video_{}_{}",
            chrono::Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4().simple()
        )
    }

    fn upload_error(message: impl Into<String>) -> TransferError {
        TransferError::new(TransferErrorKind::Upload(message.into()))
    }
}

fn hex_digest<D: Digest>(joined: &str, secret: &str) -> String
where
    sha2::digest::Output<D>: std::fmt::LowerHex,
{
    let mut hasher = D::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl ObjectStage for CloudinaryStage {
    #[instrument(skip(self, file), fields(path = %file.path().display(), size = file.size(), kind = %kind))]
    async fn upload(&self, file: &StagedFile, kind: MediaKind) -> VeracityResult<RemoteObjectHandle> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let public_id = Self::public_id();
        let signed = [
            ("folder", self.config.folder.clone()),
            ("public_id", public_id.clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = self.sign(&signed);

        let handle = tokio::fs::File::open(file.path())
            .await
            .map_err(|e| Self::upload_error(format!("{}: {}", file.path().display(), e)))?;
        let file_name = file
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let part = Part::stream_with_length(reqwest::Body::from(handle), file.size()).file_name(file_name);

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.config.folder.clone())
            .text("public_id", public_id)
            .text("signature", signature);

        let url = self.endpoint(kind, "upload");
        tracing::debug!(url = %url, "Uploading staged file");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::upload_error(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| Self::upload_error(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = body.error {
            tracing::error!(status = %status, "Remote stage rejected upload");
            return Err(Self::upload_error(error.message).into());
        }
        if !status.is_success() {
            return Err(Self::upload_error(format!("Remote stage returned: {}", status)).into());
        }

        match (body.public_id, body.secure_url) {
            (Some(public_id), Some(secure_url)) => {
                tracing::info!(public_id = %public_id, "Uploaded to remote stage");
                Ok(RemoteObjectHandle::new(public_id, secure_url, kind))
            }
            _ => Err(Self::upload_error("Upload response missing public_id or secure_url").into()),
        }
    }

    #[instrument(skip(self, handle), fields(public_id = %handle.public_id()))]
    async fn delete(&self, handle: &RemoteObjectHandle) -> VeracityResult<()> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [
            ("public_id", handle.public_id().clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = self.sign(&signed);

        let form = Form::new()
            .text("public_id", handle.public_id().clone())
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        let delete_error = |message: String| TransferError::new(TransferErrorKind::Delete(message));

        let response = self
            .client
            .post(self.endpoint(*handle.kind(), "destroy"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| delete_error(format!("Request failed: {}", e)))?;

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| delete_error(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = body.error {
            return Err(delete_error(error.message).into());
        }

        match body.result.as_deref() {
            // Already gone counts as deleted.
            Some("ok") | Some("not found") => Ok(()),
            other => Err(delete_error(format!("Unexpected destroy result: {:?}", other)).into()),
        }
    }
}
