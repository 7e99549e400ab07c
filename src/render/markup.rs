//! 文本渲染策略
//!
//! 所有内容字符串都按“纯文本 + HTML 字符引用”处理：
//! 解码命名实体和数字实体，其余内容原样输出。
//! 未知实体保持原样，方便发现内容缺陷

use phf::phf_map;
use regex::{Captures, Regex};
use std::borrow::Cow;

use crate::error::AppResult;

/// 课程内容中出现过的命名实体
static NAMED_ENTITIES: phf::Map<&'static str, &'static str> = phf_map! {
    "amp" => "&",
    "lt" => "<",
    "gt" => ">",
    "quot" => "\"",
    "apos" => "'",
    "nbsp" => "\u{00A0}",
    "thinsp" => "\u{2009}",
    "mdash" => "\u{2014}",
    "ndash" => "\u{2013}",
    "minus" => "\u{2212}",
    "ldquo" => "\u{201C}",
    "rdquo" => "\u{201D}",
    "lsquo" => "\u{2018}",
    "rsquo" => "\u{2019}",
    "hellip" => "\u{2026}",
    "bull" => "\u{2022}",
    "middot" => "\u{00B7}",
    "pound" => "\u{00A3}",
    "euro" => "\u{20AC}",
    "deg" => "\u{00B0}",
    "times" => "\u{00D7}",
    "divide" => "\u{00F7}",
    "plusmn" => "\u{00B1}",
    "micro" => "\u{00B5}",
    "mu" => "\u{03BC}",
    "Omega" => "\u{03A9}",
    "ohm" => "\u{2126}",
    "le" => "\u{2264}",
    "ge" => "\u{2265}",
    "ne" => "\u{2260}",
    "asymp" => "\u{2248}",
    "rarr" => "\u{2192}",
    "larr" => "\u{2190}",
    "uarr" => "\u{2191}",
    "darr" => "\u{2193}",
    "harr" => "\u{2194}",
    "sup2" => "\u{00B2}",
    "sup3" => "\u{00B3}",
    "frac12" => "\u{00BD}",
    "frac14" => "\u{00BC}",
    "ouml" => "\u{00F6}",
    "iuml" => "\u{00EF}",
    "eacute" => "\u{00E9}",
    "copy" => "\u{00A9}",
    "reg" => "\u{00AE}",
    "trade" => "\u{2122}",
    "sect" => "\u{00A7}",
    "check" => "\u{2713}",
};

/// 实体解码器
#[derive(Debug, Clone)]
pub struct Markup {
    entity: Regex,
}

impl Markup {
    pub fn new() -> AppResult<Self> {
        let entity = Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[A-Za-z][A-Za-z0-9]{1,31});")?;
        Ok(Self { entity })
    }

    /// 解码字符串中的 HTML 字符引用
    pub fn decode<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains('&') {
            return Cow::Borrowed(text);
        }

        self.entity.replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let name = &caps[1];
            match decode_reference(name) {
                Some(decoded) => decoded,
                None => {
                    tracing::debug!("未知实体，原样保留: {}", whole);
                    whole.to_string()
                }
            }
        })
    }
}

fn decode_reference(name: &str) -> Option<String> {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }

    if let Some(decimal) = name.strip_prefix('#') {
        return decimal
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }

    NAMED_ENTITIES.get(name).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_named_entities() {
        let markup = Markup::new().unwrap();
        assert_eq!(
            markup.decode("Key Term: &ldquo;Substance&rdquo; &mdash; broad"),
            "Key Term: \u{201C}Substance\u{201D} \u{2014} broad"
        );
        assert_eq!(markup.decode("&pound;5 &amp; 30&deg;C"), "\u{00A3}5 & 30\u{00B0}C");
    }

    #[test]
    fn test_decodes_numeric_entities() {
        let markup = Markup::new().unwrap();
        assert_eq!(markup.decode("a&#8212;b&#x2014;c"), "a\u{2014}b\u{2014}c");
    }

    #[test]
    fn test_unknown_entity_is_left_visible() {
        let markup = Markup::new().unwrap();
        assert_eq!(markup.decode("&madeup; stays"), "&madeup; stays");
        assert_eq!(markup.decode("AT&T and R&D"), "AT&T and R&D");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        let markup = Markup::new().unwrap();
        assert!(matches!(markup.decode("plain"), Cow::Borrowed("plain")));
    }
}
