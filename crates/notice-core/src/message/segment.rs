//! Rich-content segment types.
//!
//! A segment is a single unit of content in a user message. The notice
//! workflow only distinguishes three kinds:
//!
//! - `text` → [`Segment::Text`]
//! - `image` / `img` → [`Segment::Image`]
//! - anything else (`face`, `at`, `record`, ...) → [`Segment::Other`]
//!
//! # CQ Code Mapping
//!
//! - `Text` → plain text (escaped, no CQ code)
//! - `Image` → `[CQ:image,file=xxx,url=yyy]`
//! - `Other` → `[CQ:<kind>,key=value,...]`
//!
//! # Example
//!
//! ```rust,ignore
//! use notice_core::Segment;
//!
//! let text = Segment::text("Hello, ");
//! let image = Segment::image("https://example.com/a.png");
//! ```

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Segment Enum
// ============================================================================

/// A rich-content segment.
///
/// On the wire this is the OneBot `{"type": ..., "data": {...}}` object;
/// unknown types are kept as [`Segment::Other`] instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSegment", into = "RawSegment")]
pub enum Segment {
    /// Plain text content.
    Text(TextData),
    /// Image.
    Image(ImageData),
    /// Any segment kind the notice workflow cannot carry.
    Other(OtherData),
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Text(data) => write!(f, "{}", data.text),
            Segment::Image(data) => write!(f, "[图片:{}]", data.file),
            Segment::Other(data) => write!(f, "[{}]", data.kind),
        }
    }
}

impl Segment {
    /// Creates a text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text(TextData { text: text.into() })
    }

    /// Creates an image segment from a file path or URL.
    pub fn image(file: impl Into<String>) -> Self {
        Segment::Image(ImageData {
            file: file.into(),
            url: None,
            image_type: None,
        })
    }

    /// Creates a segment of an arbitrary kind.
    pub fn other(kind: impl Into<String>, attrs: Vec<(String, String)>) -> Self {
        Segment::Other(OtherData {
            kind: kind.into(),
            attrs,
        })
    }

    /// Returns the segment type name.
    pub fn segment_type(&self) -> &str {
        match self {
            Segment::Text(_) => "text",
            Segment::Image(_) => "image",
            Segment::Other(data) => &data.kind,
        }
    }

    /// Returns the text content if this is a text segment.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Segment::Text(data) => Some(&data.text),
            _ => None,
        }
    }

    /// Returns `true` for text segments.
    pub fn is_text(&self) -> bool {
        matches!(self, Segment::Text(_))
    }
}

// ============================================================================
// Segment Data Types
// ============================================================================

/// Plain text segment data.
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    /// The text content.
    pub text: String,
}

/// Image segment data.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Image file name, path, URL, or base64.
    pub file: String,
    /// Image URL (present on received images).
    pub url: Option<String>,
    /// Image type: "flash" for flash image, None for normal.
    pub image_type: Option<String>,
}

impl ImageData {
    /// Returns the HTTP(S) URL this image can be downloaded from.
    ///
    /// Prefers the `url` attribute, then `file` if it is itself a URL.
    pub fn source_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|u| is_http_url(u))
            .or_else(|| Some(self.file.as_str()).filter(|f| is_http_url(f)))
    }

    /// Returns the declared file name, reduced to its last path component.
    ///
    /// Falls back to `"image"` when nothing usable is declared.
    pub fn file_name(&self) -> &str {
        let file = self.file.split(['?', '#']).next().unwrap_or_default();
        file.rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
            .unwrap_or("image")
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Data of a segment kind the workflow does not support.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherData {
    /// The segment type name, e.g. `"face"`.
    pub kind: String,
    /// The segment attributes in declaration order.
    pub attrs: Vec<(String, String)>,
}

impl OtherData {
    /// Looks up an attribute by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// Wire Representation
// ============================================================================

/// The OneBot array-format representation of a segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSegment {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Map<String, Value>,
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        let get = |key: &str| raw.data.get(key).map(value_to_string);
        match raw.kind.as_str() {
            "text" => Segment::text(get("text").unwrap_or_default()),
            "image" | "img" if get("file").is_some() || get("url").is_some() => {
                Segment::Image(ImageData {
                    file: get("file").or_else(|| get("url")).unwrap_or_default(),
                    url: get("url"),
                    image_type: get("type"),
                })
            }
            _ => Segment::Other(OtherData {
                kind: raw.kind.clone(),
                attrs: raw
                    .data
                    .iter()
                    .map(|(k, v)| (k.clone(), value_to_string(v)))
                    .collect(),
            }),
        }
    }
}

impl From<Segment> for RawSegment {
    fn from(segment: Segment) -> Self {
        let mut data = Map::new();
        let kind = match segment {
            Segment::Text(t) => {
                data.insert("text".into(), Value::String(t.text));
                "text".to_string()
            }
            Segment::Image(i) => {
                data.insert("file".into(), Value::String(i.file));
                if let Some(url) = i.url {
                    data.insert("url".into(), Value::String(url));
                }
                if let Some(t) = i.image_type {
                    data.insert("type".into(), Value::String(t));
                }
                "image".to_string()
            }
            Segment::Other(o) => {
                for (k, v) in o.attrs {
                    data.insert(k, Value::String(v));
                }
                o.kind
            }
        };
        RawSegment { kind, data }
    }
}

// ============================================================================
// CQ Code Conversion
// ============================================================================

impl Segment {
    /// Converts this segment to a CQ code string.
    ///
    /// Text segments are returned as plain text (with escaping).
    /// Other segments are formatted as `[CQ:type,key=value,...]`.
    pub fn to_cq_code(&self) -> String {
        match self {
            Segment::Text(data) => escape_cq_text(&data.text),
            Segment::Image(data) => {
                let mut cq = format!("[CQ:image,file={}", escape_cq_value(&data.file));
                if let Some(ref t) = data.image_type {
                    let _ = write!(cq, ",type={}", escape_cq_value(t));
                }
                if let Some(ref u) = data.url {
                    let _ = write!(cq, ",url={}", escape_cq_value(u));
                }
                cq.push(']');
                cq
            }
            Segment::Other(data) => {
                let mut cq = format!("[CQ:{}", data.kind);
                for (k, v) in &data.attrs {
                    let _ = write!(cq, ",{k}={}", escape_cq_value(v));
                }
                cq.push(']');
                cq
            }
        }
    }
}

// ============================================================================
// CQ Code Escaping Utilities
// ============================================================================

/// Escapes special characters in plain text for CQ code format.
///
/// Escapes: `&` → `&amp;`, `[` → `&#91;`, `]` → `&#93;`
pub fn escape_cq_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('[', "&#91;")
        .replace(']', "&#93;")
}

/// Unescapes CQ code special characters back to plain text.
pub fn unescape_cq_text(text: &str) -> String {
    text.replace("&#91;", "[")
        .replace("&#93;", "]")
        .replace("&#44;", ",")
        .replace("&amp;", "&")
}

/// Escapes special characters in CQ code parameter values.
///
/// Escapes: `&` → `&amp;`, `[` → `&#91;`, `]` → `&#93;`, `,` → `&#44;`
pub fn escape_cq_value(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('[', "&#91;")
        .replace(']', "&#93;")
        .replace(',', "&#44;")
}

/// Unescapes CQ code parameter value special characters.
pub fn unescape_cq_value(value: &str) -> String {
    unescape_cq_text(value)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_serialize() {
        let text = Segment::text("Hello");
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#"{"type":"text","data":{"text":"Hello"}}"#);

        let image = Segment::image("a.png");
        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(json, r#"{"type":"image","data":{"file":"a.png"}}"#);
    }

    #[test]
    fn test_segment_deserialize() {
        let json = r#"{"type":"text","data":{"text":"Hello World"}}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.as_text(), Some("Hello World"));

        let json =
            r#"{"type":"image","data":{"file":"123.jpg","url":"http://example.com/123.jpg"}}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert!(
            matches!(segment, Segment::Image(ImageData { file, url: Some(_), .. }) if file == "123.jpg")
        );

        let json = r#"{"type":"face","data":{"id":178}}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        match segment {
            Segment::Other(data) => {
                assert_eq!(data.kind, "face");
                assert_eq!(data.get("id"), Some("178"));
            }
            other => panic!("expected Other, got {other:?}"),
        }
    }

    #[test]
    fn test_image_without_source_is_other() {
        let json = r#"{"type":"image","data":{}}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert!(matches!(segment, Segment::Other(_)));
    }

    #[test]
    fn test_img_spelling_is_image() {
        let json = r#"{"type":"img","data":{"url":"https://example.com/x.png"}}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert!(matches!(segment, Segment::Image(_)));
    }

    #[test]
    fn test_image_source_url() {
        let mut data = ImageData {
            file: "abc.image".into(),
            url: Some("https://gchat.qpic.cn/abc".into()),
            image_type: None,
        };
        assert_eq!(data.source_url(), Some("https://gchat.qpic.cn/abc"));

        data.url = None;
        assert_eq!(data.source_url(), None);

        data.file = "http://example.com/dir/pic.png".into();
        assert_eq!(data.source_url(), Some("http://example.com/dir/pic.png"));
    }

    #[test]
    fn test_image_file_name() {
        let data = |file: &str| ImageData {
            file: file.into(),
            url: None,
            image_type: None,
        };
        assert_eq!(data("abc.image").file_name(), "abc.image");
        assert_eq!(data("http://x.com/a/b.png?sz=1").file_name(), "b.png");
        assert_eq!(data("C:\\pics\\c.jpg").file_name(), "c.jpg");
        assert_eq!(data("http://x.com/").file_name(), "image");
        assert_eq!(data("../").file_name(), "image");
    }

    #[test]
    fn test_cq_code_conversion() {
        assert_eq!(Segment::text("Hello").to_cq_code(), "Hello");
        assert_eq!(
            Segment::image("http://example.com/1.jpg").to_cq_code(),
            "[CQ:image,file=http://example.com/1.jpg]"
        );
        assert_eq!(
            Segment::other("face", vec![("id".into(), "178".into())]).to_cq_code(),
            "[CQ:face,id=178]"
        );
    }

    #[test]
    fn test_cq_escaping() {
        assert_eq!(escape_cq_text("Hello [World]"), "Hello &#91;World&#93;");
        assert_eq!(escape_cq_text("A & B"), "A &amp; B");
        assert_eq!(unescape_cq_text("&#91;x&#93; &amp;"), "[x] &");

        assert_eq!(escape_cq_value("a,b,c"), "a&#44;b&#44;c");
        assert_eq!(unescape_cq_value("a&#44;b&#44;c"), "a,b,c");
    }
}
