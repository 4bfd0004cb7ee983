//! Object key generation.

use uuid::Uuid;

/// Longest file-name fragment kept in a key.
const MAX_NAME_LEN: usize = 100;

/// Reduce a client-supplied file name to `[A-Za-z0-9._-]`, keeping the
/// extension. Path separators and other characters become `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        return "file".to_string();
    }
    if cleaned.len() <= MAX_NAME_LEN {
        return cleaned.to_string();
    }
    // Keep the tail so the extension survives truncation.
    cleaned[cleaned.len() - MAX_NAME_LEN..].to_string()
}

/// `{folder}/{uuid}_{sanitized name}`; unique even for repeated names.
pub fn object_key(folder: &str, file_name: &str) -> String {
    let folder = folder.trim_matches('/');
    format!(
        "{folder}/{}_{}",
        Uuid::new_v4().simple(),
        sanitize_file_name(file_name)
    )
}
