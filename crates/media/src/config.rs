use std::path::PathBuf;

use crate::cloudinary::SignatureAlgorithm;

/// Which storage backend to use, with its settings.
#[derive(Debug, Clone)]
pub enum MediaBackend {
    Local {
        root: PathBuf,
        base_url: String,
    },
    Cloudinary {
        cloud_name: String,
        api_key: String,
        api_secret: String,
        signature_algorithm: SignatureAlgorithm,
    },
}

/// Media storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub backend: MediaBackend,
}

impl MediaConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                  | Default   |
    /// |--------------------------|-----------|
    /// | `MEDIA_BACKEND`          | `local`   |
    /// | `MEDIA_ROOT`             | `media`   |
    /// | `MEDIA_BASE_URL`         | `/media`  |
    /// | `CLOUDINARY_CLOUD_NAME`  | required for `cloudinary` |
    /// | `CLOUDINARY_API_KEY`     | required for `cloudinary` |
    /// | `CLOUDINARY_API_SECRET`  | required for `cloudinary` |
    /// | `CLOUDINARY_SIGNATURE_ALGORITHM` | `sha1` (or `sha256`) |
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend name, missing Cloudinary credentials or
    /// an unknown signature algorithm.
    pub fn from_env() -> Self {
        let backend = std::env::var("MEDIA_BACKEND").unwrap_or_else(|_| "local".into());

        let backend = match backend.as_str() {
            "local" => MediaBackend::Local {
                root: std::env::var("MEDIA_ROOT")
                    .unwrap_or_else(|_| "media".into())
                    .into(),
                base_url: std::env::var("MEDIA_BASE_URL").unwrap_or_else(|_| "/media".into()),
            },
            "cloudinary" => MediaBackend::Cloudinary {
                cloud_name: required("CLOUDINARY_CLOUD_NAME"),
                api_key: required("CLOUDINARY_API_KEY"),
                api_secret: required("CLOUDINARY_API_SECRET"),
                signature_algorithm: match std::env::var("CLOUDINARY_SIGNATURE_ALGORITHM") {
                    Ok(value) => value
                        .parse::<SignatureAlgorithm>()
                        .unwrap_or_else(|e| panic!("{e}")),
                    Err(_) => SignatureAlgorithm::default(),
                },
            },
            other => panic!("Unknown MEDIA_BACKEND '{other}'. Must be one of: local, cloudinary"),
        };

        Self { backend }
    }
}

fn required(name: &str) -> String {
    let value = std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"));
    assert!(!value.is_empty(), "{name} must not be empty");
    value
}
