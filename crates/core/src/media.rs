//! Media upload rules: accepted file types, size limits and stored names.
//!
//! Pure logic only; the API layer does the I/O.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ── Constants ────────────────────────────────────────────────────────

/// Image file extensions accepted for upload.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "svg"];

/// Audio file extensions accepted for upload.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "aac"];

/// Video file extensions accepted for upload.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// Default upload size limit (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Longest original file name kept in metadata.
pub const MAX_ORIGINAL_NAME_LEN: usize = 255;

// ── Types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }

    /// Derive the kind from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<MediaKind> {
        let ext = extension.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Audio)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Subdirectory of the media root holding files of this kind.
    pub fn directory(self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "audio" => Ok(MediaKind::Audio),
            "video" => Ok(MediaKind::Video),
            other => Err(CoreError::Validation(format!(
                "Unknown media kind '{other}'. Must be one of: image, audio, video"
            ))),
        }
    }
}

// ── Pure Functions ───────────────────────────────────────────────────

/// Lowercase extension of `file_name`, without the dot.
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// Check an upload's name and size, returning its kind and extension.
pub fn validate_upload(
    file_name: &str,
    size_bytes: u64,
    max_bytes: u64,
) -> Result<(MediaKind, String), CoreError> {
    if file_name.trim().is_empty() {
        return Err(CoreError::Validation("File name is required".to_string()));
    }
    let ext = file_extension(file_name).ok_or_else(|| {
        CoreError::Validation(format!("File '{file_name}' has no extension"))
    })?;
    let kind = MediaKind::from_extension(&ext).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unsupported file type '.{ext}'. Allowed: {}",
            allowed_extensions().join(", ")
        ))
    })?;
    if size_bytes == 0 {
        return Err(CoreError::Validation("File is empty".to_string()));
    }
    if size_bytes > max_bytes {
        return Err(CoreError::Validation(format!(
            "File is {size_bytes} bytes; the limit is {max_bytes} bytes"
        )));
    }
    Ok((kind, ext))
}

/// Every accepted extension.
pub fn allowed_extensions() -> Vec<&'static str> {
    IMAGE_EXTENSIONS
        .iter()
        .chain(AUDIO_EXTENSIONS)
        .chain(VIDEO_EXTENSIONS)
        .copied()
        .collect()
}

/// Relative path a new upload is stored under, e.g. `images/0190....png`.
///
/// The name is generated, so user-supplied names never reach the file
/// system.
pub fn stored_path(kind: MediaKind, extension: &str) -> String {
    format!("{}/{}.{extension}", kind.directory(), uuid::Uuid::now_v7())
}

/// Strip directories and control characters from a client file name and
/// cap its length.
pub fn sanitize_original_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    base.chars()
        .filter(|c| !c.is_control())
        .take(MAX_ORIGINAL_NAME_LEN)
        .collect()
}
