//! Image attachments for profile forms, stored inline as data URLs.

use crate::commands::CliError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use std::path::Path;

/// Reads an image file into a `data:<mime>;base64,...` URL.
///
/// # Errors
/// - `CliError::Upload` when the extension is not a known image type or the
///   file cannot be read.
pub fn image_data_url(path: &Path) -> Result<String, CliError> {
    let upload_err = |message: String| CliError::Upload {
        path: path.display().to_string(),
        message,
    };

    let mime = image_mime(path).ok_or_else(|| {
        upload_err("expected a png, jpeg, gif, webp, svg or bmp image".to_string())
    })?;
    let bytes = std::fs::read(path).map_err(|err| upload_err(err.to_string()))?;

    debug!(
        "event=image_attach module=cli status=ok mime={} bytes={}",
        mime,
        bytes.len()
    );
    Ok(data_url(mime, &bytes))
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
