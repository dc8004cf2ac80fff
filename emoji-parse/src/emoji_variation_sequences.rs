use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::common::{
    emoji_file_path, Codepoint, CodepointIter, UcdFile, UcdFileByCodepoint,
};
use crate::error::Error;

/// The presentation requested by a variation sequence.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VariationStyle {
    /// `text style`, requested by U+FE0E.
    Text,
    /// `emoji style`, requested by U+FE0F.
    Emoji,
}

impl VariationStyle {
    /// The variation selector that requests this style.
    pub fn selector(&self) -> u32 {
        match *self {
            VariationStyle::Text => 0xFE0E,
            VariationStyle::Emoji => 0xFE0F,
        }
    }
}

impl Default for VariationStyle {
    fn default() -> VariationStyle {
        VariationStyle::Text
    }
}

impl FromStr for VariationStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<VariationStyle, Error> {
        match s {
            "text style" => Ok(VariationStyle::Text),
            "emoji style" => Ok(VariationStyle::Emoji),
            _ => err!("unrecognized variation style: '{}'", s),
        }
    }
}

impl fmt::Display for VariationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            VariationStyle::Text => write!(f, "text style"),
            VariationStyle::Emoji => write!(f, "emoji style"),
        }
    }
}

/// A single row in the `emoji-variation-sequences.txt` file.
///
/// Every codepoint listed in this file has two rows: one for its text style
/// sequence and one for its emoji style sequence.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EmojiVariationSequence {
    /// The base codepoint of the sequence.
    pub codepoint: Codepoint,
    /// The variation selector following the base.
    pub selector: Codepoint,
    /// The presentation this sequence requests.
    pub style: VariationStyle,
}

impl UcdFile for EmojiVariationSequence {
    fn relative_file_path() -> &'static Path {
        Path::new("emoji/emoji-variation-sequences.txt")
    }

    fn file_path<P: AsRef<Path>>(ucd_dir: P) -> PathBuf {
        emoji_file_path(ucd_dir.as_ref(), "emoji-variation-sequences.txt")
    }
}

impl UcdFileByCodepoint for EmojiVariationSequence {
    fn codepoints(&self) -> CodepointIter {
        self.codepoint.into_iter()
    }
}

impl FromStr for EmojiVariationSequence {
    type Err = Error;

    fn from_str(line: &str) -> Result<EmojiVariationSequence, Error> {
        lazy_static! {
            static ref PARTS: Regex = Regex::new(
                r"(?x)
                ^
                \s*(?P<codepoint>[A-Fa-f0-9]+)
                \s+(?P<selector>[A-Fa-f0-9]+)\s*;
                \s*(?P<style>[^;\x23]+?)\s*
                (?:;|\x23|$)
                "
            )
            .unwrap();
        };

        let caps = match PARTS.captures(line.trim()) {
            Some(caps) => caps,
            None => return err!("invalid variation sequence line: '{}'", line),
        };
        let codepoint: Codepoint = caps["codepoint"].parse()?;
        let selector: Codepoint = caps["selector"].parse()?;
        let style: VariationStyle = caps["style"].parse()?;
        if selector != style.selector() {
            return err!(
                "{} sequence for {} uses selector {}",
                style,
                codepoint,
                selector,
            );
        }
        Ok(EmojiVariationSequence { codepoint, selector, style })
    }
}
