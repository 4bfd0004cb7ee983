//! Cloudinary raw-file storage.
//!
//! Uploads go to `/{cloud}/raw/upload` as signed multipart requests, deletes
//! to `/{cloud}/raw/destroy`. Signatures are a digest of the sorted
//! parameters followed by the API secret: SHA-1 as Cloudinary expects by
//! default, or SHA-256 for accounts switched to it.

use std::str::FromStr;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::keys::object_key;
use crate::{MediaError, MediaStorage, StoredMedia};

/// Default API host.
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Digest used for request signatures; must match the account setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl FromStr for SignatureAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            other => Err(format!(
                "Unknown signature algorithm '{other}'. Must be one of: sha1, sha256"
            )),
        }
    }
}

pub struct CloudinaryStorage {
    client: reqwest::Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    algorithm: SignatureAlgorithm,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryStorage {
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            cloud_name,
            api_key,
            api_secret,
            algorithm: SignatureAlgorithm::default(),
        }
    }

    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Point the client at another API host (e.g. a local stub).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/raw/{action}", self.api_base, self.cloud_name)
    }

    /// Turn a non-success response into [`MediaError::Provider`].
    async fn provider_error(response: reqwest::Response) -> MediaError {
        let status = response.status();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error.message,
            Err(_) => "no error body".to_string(),
        };
        MediaError::Provider(format!("Cloudinary returned {status}: {message}"))
    }
}

/// Sign request parameters: sort by name, join as `k=v` with `&`, append
/// the secret, hex digest.
pub fn sign(params: &[(&str, &str)], api_secret: &str, algorithm: SignatureAlgorithm) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let payload = format!("{joined}{api_secret}");
    match algorithm {
        SignatureAlgorithm::Sha1 => format!("{:x}", Sha1::digest(payload.as_bytes())),
        SignatureAlgorithm::Sha256 => format!("{:x}", Sha256::digest(payload.as_bytes())),
    }
}

#[async_trait]
impl MediaStorage for CloudinaryStorage {
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredMedia, MediaError> {
        let public_id = object_key(folder, file_name);
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id.as_str()), ("timestamp", timestamp.as_str())],
            &self.api_secret,
            self.algorithm,
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("public_id", public_id.clone())
            .text("timestamp", timestamp)
            .text("api_key", self.api_key.clone())
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let body: UploadResponse = response.json().await?;
        tracing::info!(public_id = %body.public_id, "Uploaded raw media to Cloudinary");
        Ok(StoredMedia {
            key: body.public_id,
            url: body.secure_url,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), MediaError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", key), ("timestamp", timestamp.as_str())],
            &self.api_secret,
            self.algorithm,
        );

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", key),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(MediaError::Provider(format!(
                "Cloudinary refused to delete '{key}': {other}"
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "cloudinary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRIEF_PARAMS: [(&str, &str); 2] = [
        ("timestamp", "1700000000"),
        ("public_id", "attachments/brief.pdf"),
    ];

    #[test]
    fn signature_defaults_to_sha1() {
        let sig = sign(&BRIEF_PARAMS, "abcd", SignatureAlgorithm::default());
        assert_eq!(sig, "dfb28bdd7cdeadddd3cf70edc172d8dad8c2b629");
    }

    #[test]
    fn signature_with_sha256() {
        let sig = sign(&BRIEF_PARAMS, "abcd", SignatureAlgorithm::Sha256);
        assert_eq!(
            sig,
            "684c298ae5a29ac4743f73e233af1984678cd00956716a8217b623e992915999"
        );
    }

    #[test]
    fn signature_sorts_parameters() {
        let a = sign(
            &[("timestamp", "1"), ("public_id", "a"), ("folder", "x")],
            "secret",
            SignatureAlgorithm::Sha1,
        );
        let b = sign(
            &[("folder", "x"), ("public_id", "a"), ("timestamp", "1")],
            "secret",
            SignatureAlgorithm::Sha1,
        );
        assert_eq!(a, b);
        assert_eq!(a, "683be2c5dbbdf721b22c6c760ff2e06e500bf486");
    }

    #[test]
    fn algorithm_parses_case_insensitively() {
        assert_eq!("SHA256".parse::<SignatureAlgorithm>(), Ok(SignatureAlgorithm::Sha256));
        assert_eq!("sha1".parse::<SignatureAlgorithm>(), Ok(SignatureAlgorithm::Sha1));
        assert!("md5".parse::<SignatureAlgorithm>().is_err());
    }

    #[test]
    fn endpoint_uses_raw_resource_type() {
        let storage = CloudinaryStorage::new("demo".into(), "key".into(), "secret".into())
            .with_api_base("http://127.0.0.1:9999/v1_1/");
        assert_eq!(
            storage.endpoint("upload"),
            "http://127.0.0.1:9999/v1_1/demo/raw/upload"
        );
        assert_eq!(storage.backend_name(), "cloudinary");
    }
}
