//! Reply parsing, classification and validation.

use notice_core::{RichMessage, Segment};

/// Reply substring that cancels the invocation.
pub const CANCEL_KEYWORD: &str = "取消发送公告";

/// Longest accepted notice text, in characters.
pub const MAX_NOTICE_LEN: usize = 600;

/// Whether the raw reply asks to cancel.
pub fn is_cancel(raw: &str) -> bool {
    raw.contains(CANCEL_KEYWORD)
}

/// Where to download the notice image from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// HTTP(S) URL of the image.
    pub url: String,
    /// File name declared by the segment.
    pub file_name: String,
}

/// A classified reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedContent {
    /// Text segments in reply order.
    pub text_segments: Vec<String>,
    /// The last downloadable image in the reply.
    pub image: Option<ImageSource>,
    /// Whether the reply held anything besides text and images.
    pub unsupported_present: bool,
}

impl ParsedContent {
    /// Parses and classifies a CQ-coded reply.
    pub fn parse(raw: &str) -> Self {
        Self::classify(&RichMessage::from_cq_string(raw))
    }

    /// Classifies the segments of a message.
    ///
    /// Later images replace earlier ones. An image with no HTTP(S) source
    /// cannot be staged and counts as unsupported content.
    pub fn classify(message: &RichMessage) -> Self {
        let mut parsed = Self::default();
        for segment in message {
            match segment {
                Segment::Text(data) => parsed.text_segments.push(data.text.clone()),
                Segment::Image(data) => match data.source_url() {
                    Some(url) => {
                        parsed.image = Some(ImageSource {
                            url: url.to_string(),
                            file_name: data.file_name().to_string(),
                        });
                    }
                    None => parsed.unsupported_present = true,
                },
                Segment::Other(_) => parsed.unsupported_present = true,
            }
        }
        parsed
    }

    /// The notice text: text segments joined by newlines.
    pub fn text(&self) -> String {
        self.text_segments.join("\n")
    }
}

/// Checks the notice length.
///
/// Returns the length in characters, as `Err` when it is outside
/// `1..=MAX_NOTICE_LEN`.
pub fn check_length(text: &str) -> Result<usize, usize> {
    let length = text.chars().count();
    if (1..=MAX_NOTICE_LEN).contains(&length) {
        Ok(length)
    } else {
        Err(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_substring() {
        assert!(is_cancel("取消发送公告"));
        assert!(is_cancel("算了，取消发送公告吧"));
        assert!(!is_cancel("取消"));
    }

    #[test]
    fn test_plain_text() {
        let parsed = ParsedContent::parse("Hello\nWorld");
        assert_eq!(parsed.text(), "Hello\nWorld");
        assert!(parsed.image.is_none());
        assert!(!parsed.unsupported_present);
    }

    #[test]
    fn test_text_runs_joined_with_newline() {
        let parsed = ParsedContent::parse("Hello[CQ:face,id=1]World");
        assert_eq!(parsed.text_segments, vec!["Hello", "World"]);
        assert_eq!(parsed.text(), "Hello\nWorld");
        assert!(parsed.unsupported_present);
    }

    #[test]
    fn test_last_image_wins() {
        let parsed = ParsedContent::parse(
            "Notice[CQ:image,file=a.png,url=https://example.com/a.png]\
             [CQ:img,file=https://example.com/dir/b.jpg]",
        );
        assert_eq!(
            parsed.image,
            Some(ImageSource {
                url: "https://example.com/dir/b.jpg".into(),
                file_name: "b.jpg".into(),
            })
        );
        assert!(!parsed.unsupported_present);
    }

    #[test]
    fn test_image_without_source_is_unsupported() {
        let parsed = ParsedContent::parse("Hi[CQ:image,file=abc.image]");
        assert!(parsed.image.is_none());
        assert!(parsed.unsupported_present);
    }

    #[test]
    fn test_check_length_counts_chars() {
        assert_eq!(check_length(&"公".repeat(600)), Ok(600));
        assert_eq!(check_length(&"公".repeat(601)), Err(601));
        assert_eq!(check_length(""), Err(0));
        assert_eq!(check_length("a"), Ok(1));
    }

    #[test]
    fn test_escaped_text_is_unescaped() {
        let parsed = ParsedContent::parse("a &#91;b&#93; &amp; c");
        assert_eq!(parsed.text(), "a [b] & c");
    }
}
