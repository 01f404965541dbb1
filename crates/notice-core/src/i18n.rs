//! Localized user-facing texts.
//!
//! Every message the notice workflow shows a user is a [`NoticeText`]. Hosts
//! render it through [`ConversationContext::localize`], usually by
//! delegating to a [`Catalog`].
//!
//! | Key | Parameters |
//! |-----|------------|
//! | `what-to-add` | |
//! | `cancelled` | |
//! | `type-warn` | |
//! | `length-warn` | `length` |
//! | `img-send-fail` | |
//! | `success` | |
//!
//! [`ConversationContext::localize`]: crate::ConversationContext::localize

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user-facing message of the notice workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeText {
    /// Asks the user for the notice content.
    WhatToAdd,
    /// The user cancelled.
    Cancelled,
    /// The reply contained content other than text and one image.
    TypeWarn,
    /// The notice text has an unacceptable length.
    LengthWarn {
        /// The measured length in characters.
        length: usize,
    },
    /// The image could not be attached; text only will be sent.
    ImgSendFail,
    /// All notices were published.
    Success,
}

impl NoticeText {
    /// Returns the message key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::WhatToAdd => "what-to-add",
            Self::Cancelled => "cancelled",
            Self::TypeWarn => "type-warn",
            Self::LengthWarn { .. } => "length-warn",
            Self::ImgSendFail => "img-send-fail",
            Self::Success => "success",
        }
    }

    /// Returns the named parameters of this message.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::LengthWarn { length } => vec![("length", length.to_string())],
            _ => Vec::new(),
        }
    }
}

/// Supported locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Simplified Chinese.
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// English.
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// Returns the BCP 47 tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "zh-cn" | "zh" => Ok(Self::ZhCn),
            "en-us" | "en" => Ok(Self::EnUs),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Built-in message templates for one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    /// Creates a catalog for `locale`.
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Returns the catalog's locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Renders `text`, substituting `{name}` placeholders.
    pub fn render(&self, text: &NoticeText) -> String {
        let mut out = template(self.locale, text.key()).to_string();
        for (name, value) in text.params() {
            out = out.replace(&format!("{{{name}}}"), &value);
        }
        out
    }
}

fn template(locale: Locale, key: &str) -> &'static str {
    match (locale, key) {
        (Locale::ZhCn, "what-to-add") => "请发送公告内容（仅支持文字和一张图片），发送“取消发送公告”可取消。",
        (Locale::ZhCn, "cancelled") => "已取消发送公告。",
        (Locale::ZhCn, "type-warn") => "公告仅支持文字和一张图片，其他内容已被忽略。",
        (Locale::ZhCn, "length-warn") => "公告长度应在 1 到 600 字之间，当前为 {length} 字。",
        (Locale::ZhCn, "img-send-fail") => "图片发送失败，已改为仅发送文字公告。",
        (Locale::ZhCn, "success") => "公告发送成功。",
        (Locale::EnUs, "what-to-add") => {
            "Send the notice content (text and at most one image). Reply \"取消发送公告\" to cancel."
        }
        (Locale::EnUs, "cancelled") => "Notice cancelled.",
        (Locale::EnUs, "type-warn") => {
            "Notices only support text and one image; other content was ignored."
        }
        (Locale::EnUs, "length-warn") => {
            "A notice must be between 1 and 600 characters long, got {length}."
        }
        (Locale::EnUs, "img-send-fail") => "Failed to attach the image, sent text only.",
        (Locale::EnUs, "success") => "Notice sent.",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(NoticeText::WhatToAdd.key(), "what-to-add");
        assert_eq!(NoticeText::LengthWarn { length: 3 }.key(), "length-warn");
        assert_eq!(NoticeText::ImgSendFail.key(), "img-send-fail");
    }

    #[test]
    fn test_render_substitutes_length() {
        let catalog = Catalog::new(Locale::EnUs);
        let text = catalog.render(&NoticeText::LengthWarn { length: 601 });
        assert!(text.contains("601"));
        assert!(!text.contains("{length}"));

        let text = Catalog::default().render(&NoticeText::LengthWarn { length: 0 });
        assert!(text.contains(" 0 "));
    }

    #[test]
    fn test_every_key_has_a_template() {
        let texts = [
            NoticeText::WhatToAdd,
            NoticeText::Cancelled,
            NoticeText::TypeWarn,
            NoticeText::LengthWarn { length: 1 },
            NoticeText::ImgSendFail,
            NoticeText::Success,
        ];
        for locale in [Locale::ZhCn, Locale::EnUs] {
            let catalog = Catalog::new(locale);
            for text in &texts {
                assert!(!catalog.render(text).is_empty(), "{locale}: {}", text.key());
            }
        }
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("zh_CN".parse::<Locale>().unwrap(), Locale::ZhCn);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert!("fr".parse::<Locale>().is_err());

        let locale: Locale = serde_json::from_str(r#""en-US""#).unwrap();
        assert_eq!(locale, Locale::EnUs);
    }
}
