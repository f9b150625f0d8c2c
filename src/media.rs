//! Human readable media categories for files returned by the daemon.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MediaType {
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "script")]
    Script,
    #[serde(rename = "document")]
    Document,
    #[serde(rename = "e-book")]
    EBook,
    #[serde(rename = "3D-file")]
    ThreeDFile,
    #[serde(rename = "comic-book")]
    ComicBook,
    #[serde(rename = "application")]
    Application,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Extension groups in priority order; the first group containing the
/// extension wins, so `pdf` and `docx` are documents, never e-books.
const EXTENSION_GROUPS: &[(&[&str], MediaType)] = &[
    (&["mp4", "m4v", "webm", "flv", "f4v", "ogv"], MediaType::Video),
    (&["mp3", "m4a", "aac", "wav", "flac", "ogg", "opus"], MediaType::Audio),
    (&["jpeg", "jpg", "png", "gif", "svg", "webp"], MediaType::Image),
    (
        &[
            "h", "go", "ja", "java", "js", "jsx", "c", "cpp", "cs", "css", "rb", "scss", "sh",
            "php", "py",
        ],
        MediaType::Script,
    ),
    (
        &[
            "html", "json", "csv", "txt", "log", "md", "markdown", "docx", "pdf", "xml", "yml",
            "yaml",
        ],
        MediaType::Document,
    ),
    (&["pdf", "odf", "doc", "docx", "epub", "org", "rtf"], MediaType::EBook),
    (&["stl", "obj", "fbx", "gcode"], MediaType::ThreeDFile),
    (&["cbr", "cbt", "cbz"], MediaType::ComicBook),
    (&["lbry"], MediaType::Application),
];

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Image => "image",
            MediaType::Script => "script",
            MediaType::Document => "document",
            MediaType::EBook => "e-book",
            MediaType::ThreeDFile => "3D-file",
            MediaType::ComicBook => "comic-book",
            MediaType::Application => "application",
            MediaType::Unknown => "unknown",
        }
    }

    fn from_extension(ext: &str) -> Self {
        EXTENSION_GROUPS
            .iter()
            .find(|(exts, _)| exts.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .map(|(_, media_type)| *media_type)
            .unwrap_or(MediaType::Unknown)
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = std::convert::Infallible;

    /// Never fails: anything outside the enumeration is `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let media_type = match s.to_ascii_lowercase().as_str() {
            "video" => MediaType::Video,
            "audio" => MediaType::Audio,
            "image" => MediaType::Image,
            "script" => MediaType::Script,
            "document" => MediaType::Document,
            "e-book" => MediaType::EBook,
            "3d-file" => MediaType::ThreeDFile,
            "comic-book" => MediaType::ComicBook,
            "application" => MediaType::Application,
            _ => MediaType::Unknown,
        };
        Ok(media_type)
    }
}

/// Classify a file by name, falling back to the top-level MIME type.
///
/// A file name containing a `.` is decided by its extension alone, even
/// when nothing matches. Top-level MIME types outside the enumeration
/// (`text`, `model`, ...) are clamped to [`MediaType::Unknown`].
pub fn media_type(content_type: Option<&str>, file_name: Option<&str>) -> MediaType {
    if let Some((_, ext)) = file_name.and_then(|name| name.rsplit_once('.')) {
        return MediaType::from_extension(ext);
    }
    match content_type.filter(|ct| !ct.is_empty()) {
        Some(content_type) => content_type
            .split('/')
            .next()
            .filter(|top| !top.is_empty())
            .and_then(|top| top.parse().ok())
            .unwrap_or(MediaType::Unknown),
        None => MediaType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(media_type(None, Some("movie.mp4")), MediaType::Video);
        assert_eq!(media_type(None, Some("archive.cbz")), MediaType::ComicBook);
        assert_eq!(media_type(None, Some("song.FLAC")), MediaType::Audio);
        assert_eq!(media_type(None, Some("scene.gcode")), MediaType::ThreeDFile);
        assert_eq!(media_type(None, Some("app.lbry")), MediaType::Application);
        assert_eq!(media_type(None, Some("main.rb")), MediaType::Script);
    }

    #[test]
    fn earlier_group_wins() {
        assert_eq!(media_type(None, Some("paper.pdf")), MediaType::Document);
        assert_eq!(media_type(None, Some("notes.docx")), MediaType::Document);
        assert_eq!(media_type(None, Some("novel.epub")), MediaType::EBook);
    }

    #[test]
    fn only_last_extension_counts() {
        assert_eq!(media_type(None, Some("clip.mp4.part")), MediaType::Unknown);
        assert_eq!(media_type(None, Some("backup.tar.mp3")), MediaType::Audio);
    }

    #[test]
    fn file_name_without_extension() {
        assert_eq!(media_type(None, Some("noext")), MediaType::Unknown);
        assert_eq!(media_type(Some("video/mp4"), Some("noext")), MediaType::Video);
    }

    #[test]
    fn unmatched_extension_ignores_content_type() {
        assert_eq!(media_type(Some("video/mp4"), Some("clip.xyz")), MediaType::Unknown);
    }

    #[test]
    fn classifies_by_content_type() {
        assert_eq!(media_type(Some("image/png"), None), MediaType::Image);
        assert_eq!(media_type(Some("audio/ogg"), None), MediaType::Audio);
        assert_eq!(media_type(Some("application/pdf"), None), MediaType::Application);
        assert_eq!(media_type(Some("text/plain"), None), MediaType::Unknown);
        assert_eq!(media_type(Some("/weird"), None), MediaType::Unknown);
        assert_eq!(media_type(Some(""), None), MediaType::Unknown);
        assert_eq!(media_type(None, None), MediaType::Unknown);
    }

    #[test]
    fn serializes_as_display_name() {
        assert_eq!(
            serde_json::to_string(&MediaType::ThreeDFile).unwrap(),
            "\"3D-file\""
        );
        assert_eq!(MediaType::EBook.to_string(), "e-book");
    }
}
