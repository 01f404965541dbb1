//! Rich-content messages.
//!
//! This module provides [`RichMessage`], an ordered sequence of
//! [`Segment`]s, and the CQ-code parser that turns a raw reply string into
//! one.
//!
//! # Message Formats
//!
//! OneBot v11 delivers messages in two formats:
//! - **Array format**: a JSON array of `{type, data}` segments
//! - **String format**: a CQ-coded string
//!
//! Both deserialize into the same [`RichMessage`].

pub mod segment;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use segment::{
    ImageData, OtherData, Segment, TextData, escape_cq_text, escape_cq_value, unescape_cq_text,
    unescape_cq_value,
};

// ============================================================================
// RichMessage
// ============================================================================

/// A message composed of multiple segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichMessage {
    segments: Vec<Segment>,
}

impl Serialize for RichMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Always serialize as array format
        self.segments.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RichMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MessageFormat {
            Array(Vec<Segment>),
            String(String),
        }

        match MessageFormat::deserialize(deserializer)? {
            MessageFormat::Array(segments) => Ok(RichMessage { segments }),
            MessageFormat::String(cq_string) => Ok(RichMessage::from_cq_string(&cq_string)),
        }
    }
}

impl RichMessage {
    /// Creates a new empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a CQ code string into a message.
    pub fn from_cq_string(cq_string: &str) -> Self {
        Self {
            segments: parse_cq_string(cq_string),
        }
    }

    /// Adds a segment.
    pub fn segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Returns the segments as a slice.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns an iterator over the segments.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the message has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Converts the message to CQ code string format.
    pub fn to_cq_string(&self) -> String {
        self.segments.iter().map(Segment::to_cq_code).collect()
    }

    /// Checks if the message contains only text segments.
    pub fn is_plain_text(&self) -> bool {
        self.segments.iter().all(Segment::is_text)
    }
}

impl From<Vec<Segment>> for RichMessage {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for RichMessage {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RichMessage {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a RichMessage {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

// ============================================================================
// CQ Code Parsing
// ============================================================================

const CQ_START: [char; 4] = ['[', 'C', 'Q', ':'];

/// Parses a CQ code string into a vector of segments.
///
/// Text and CQ codes may be freely mixed:
/// ```text
/// Hello [CQ:face,id=178] World [CQ:image,file=a.jpg,url=https://...]
/// ```
///
/// Text runs are unescaped. Every CQ code becomes a segment; kinds other
/// than `image`/`img` (or an image code with no `file`/`url`) become
/// [`Segment::Other`].
pub fn parse_cq_string(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pos = 0;
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let at_cq_start = |pos: usize| pos + 4 <= len && chars[pos..pos + 4] == CQ_START;

    while pos < len {
        if at_cq_start(pos) {
            pos += 4; // Skip [CQ:

            // Function name runs up to `,` or `]`
            let func_start = pos;
            while pos < len && chars[pos] != ',' && chars[pos] != ']' {
                pos += 1;
            }
            let func_name: String = chars[func_start..pos].iter().collect();

            let mut params: Vec<(String, String)> = Vec::new();
            while pos < len && chars[pos] == ',' {
                pos += 1;

                let param_start = pos;
                while pos < len && chars[pos] != '=' && chars[pos] != ']' && chars[pos] != ',' {
                    pos += 1;
                }
                let param_name: String = chars[param_start..pos].iter().collect();

                let mut param_value = String::new();
                if pos < len && chars[pos] == '=' {
                    pos += 1;
                    let value_start = pos;
                    while pos < len && chars[pos] != ',' && chars[pos] != ']' {
                        pos += 1;
                    }
                    let raw: String = chars[value_start..pos].iter().collect();
                    param_value = unescape_cq_value(&raw);
                }
                if !param_name.is_empty() {
                    params.push((param_name, param_value));
                }
            }

            // Skip the closing ]
            if pos < len && chars[pos] == ']' {
                pos += 1;
            }

            segments.push(cq_to_segment(func_name.trim(), params));
        } else {
            // Regular text runs until the next CQ code or the end
            let start = pos;
            while pos < len && !at_cq_start(pos) {
                pos += 1;
            }
            let text = unescape_cq_text(&chars[start..pos].iter().collect::<String>());
            if !text.is_empty() {
                segments.push(Segment::text(text));
            }
        }
    }

    segments
}

/// Converts a parsed CQ code into a segment.
fn cq_to_segment(func: &str, params: Vec<(String, String)>) -> Segment {
    let get = |key: &str| -> Option<String> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    match func {
        "image" | "img" if get("file").is_some() || get("url").is_some() => {
            Segment::Image(ImageData {
                file: get("file").or_else(|| get("url")).unwrap_or_default(),
                url: get("url"),
                image_type: get("type"),
            })
        }
        _ => Segment::other(func, params),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text() {
        let segments = parse_cq_string("Hello\nWorld");
        assert_eq!(segments, vec![Segment::text("Hello\nWorld")]);
    }

    #[test]
    fn test_parse_cq_string() {
        let segments = parse_cq_string("Hello [CQ:face,id=178] World");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].as_text(), Some("Hello "));
        assert_eq!(segments[1].segment_type(), "face");
        assert_eq!(segments[2].as_text(), Some(" World"));
    }

    #[test]
    fn test_parse_image_with_url() {
        let segments = parse_cq_string(
            "[CQ:at,qq=10001000]你好[CQ:image,file=123.jpg,url=https://a.b/c&#44;d]",
        );
        assert_eq!(segments.len(), 3);
        assert!(matches!(&segments[0], Segment::Other(o) if o.kind == "at"));
        assert_eq!(segments[1].as_text(), Some("你好"));
        match &segments[2] {
            Segment::Image(img) => {
                assert_eq!(img.file, "123.jpg");
                assert_eq!(img.url.as_deref(), Some("https://a.b/c,d"));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_image_without_source() {
        let segments = parse_cq_string("[CQ:image]");
        assert!(matches!(&segments[0], Segment::Other(o) if o.kind == "image"));
    }

    #[test]
    fn test_parse_unterminated_code() {
        let segments = parse_cq_string("text [CQ:face,id=1");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].as_text(), Some("text "));
        assert!(matches!(&segments[1], Segment::Other(o) if o.get("id") == Some("1")));
    }

    #[test]
    fn test_cq_escaping() {
        let segments = parse_cq_string("&#91;escaped&#93; &amp; test");
        assert_eq!(segments, vec![Segment::text("[escaped] & test")]);
    }

    #[test]
    fn test_to_cq_string() {
        let msg = RichMessage::new()
            .segment(Segment::text("Hello "))
            .segment(Segment::image("a.jpg"))
            .segment(Segment::text(" [x]"));
        assert_eq!(msg.to_cq_string(), "Hello [CQ:image,file=a.jpg] &#91;x&#93;");
    }

    #[test]
    fn test_message_deserialize_both_formats() {
        let json = r#"[{"type":"text","data":{"text":"Hello"}},{"type":"at","data":{"qq":"1"}}]"#;
        let msg: RichMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.len(), 2);
        assert!(!msg.is_plain_text());

        let json = r#""Hello [CQ:face,id=178] World""#;
        let msg: RichMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.len(), 3);
    }
}
