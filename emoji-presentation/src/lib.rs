/*!
Emoji detection and presentation normalization.

This crate answers two kinds of questions about text, following
[UTS #51](https://www.unicode.org/reports/tr51/):

* Does this text contain an emoji (or, more specifically, a flag)?
* How should this text be rewritten such that every character with both a
  text and an emoji form is consistently shown as text, or as emoji?

Both are answered by scanning codepoints left to right against four range
tables derived from the Unicode emoji data files. The tables for Unicode
16.0.0 are compiled into this crate and used by the free functions below.
Tables loaded at runtime, e.g., for a different Unicode version, can be used
through the methods on [`EmojiTables`].

```
use emoji_presentation::{contains_emoji, to_text_presentation};

assert!(contains_emoji("good morning \u{2600}\u{FE0F}"));
assert!(!contains_emoji("good morning \u{2600}"));
assert_eq!(to_text_presentation("\u{23F3}"), "\u{23F3}\u{FE0E}");
```

None of these operations fail or allocate beyond their output, and all of
them are safe to call concurrently.
*/

#![deny(missing_docs)]

pub use crate::detect::contains_flag;
pub use crate::error::{Error, ErrorKind};
pub use crate::normalize::Presentation;
pub use crate::range::{RangeTable, RangeTableOwned};
pub use crate::sequence::{
    is_flag_pair, is_flag_sequence, is_flag_sequence_at, is_keycap_base,
    is_keycap_sequence, is_presentation_selector, is_regional_indicator, is_skin_tone, Sequence,
    EMOJI_SELECTOR, KEYCAP, REGIONAL_INDICATOR_A, REGIONAL_INDICATOR_Z,
    SKIN_TONE_DARK, SKIN_TONE_LIGHT, TEXT_SELECTOR,
};
pub use crate::tables::{EmojiTables, EmojiTablesOwned, Table};

mod detect;
mod error;
mod normalize;
mod range;
mod sequence;
mod tables;
#[allow(dead_code)]
#[rustfmt::skip]
mod unicode_tables;

/// The version of Unicode that the bundled tables were generated from.
pub const UNICODE_VERSION: (u64, u64, u64) = (16, 0, 0);

const BUNDLED: EmojiTables<'static> = EmojiTables::bundled();

/// Returns true if `cp` is an emoji by itself.
///
/// ```
/// use emoji_presentation::is_single_character_emoji;
///
/// assert!(is_single_character_emoji('\u{231B}'));
/// assert!(!is_single_character_emoji('\u{2600}'));
/// assert!(!is_single_character_emoji('A'));
/// ```
///
/// See [`EmojiTables::is_single_character_emoji`].
pub fn is_single_character_emoji(cp: char) -> bool {
    BUNDLED.is_single_character_emoji(cp)
}

/// Returns true if `text` contains at least one emoji.
///
/// See [`EmojiTables::contains_emoji`].
pub fn contains_emoji(text: &str) -> bool {
    BUNDLED.contains_emoji(text)
}

/// Rewrite `text` such that every eligible emoji is presented as text.
///
/// See [`EmojiTables::to_text_presentation`].
pub fn to_text_presentation(text: &str) -> String {
    BUNDLED.to_text_presentation(text)
}

/// Rewrite `text` such that every eligible emoji is presented as emoji.
///
/// ```
/// use emoji_presentation::to_emoji_presentation;
///
/// assert_eq!(to_emoji_presentation("\u{2600}\u{FE0E}"), "\u{2600}\u{FE0F}");
/// ```
///
/// See [`EmojiTables::to_emoji_presentation`].
pub fn to_emoji_presentation(text: &str) -> String {
    BUNDLED.to_emoji_presentation(text)
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;

    use super::*;

    lazy_static! {
        static ref LOADED: EmojiTablesOwned = {
            let bundled = EmojiTables::bundled();
            EmojiTablesOwned::from_bytes(
                &bundled.presentable().to_bytes(),
                &bundled.text_default().to_bytes(),
                &bundled.modifier_base().to_bytes(),
                &bundled.variation_eligible().to_bytes(),
            )
            .unwrap()
        };
    }

    #[test]
    fn free_functions_use_bundled_tables() {
        assert!(is_single_character_emoji('\u{1F947}'));
        assert!(contains_emoji("\u{1F1F3}\u{1F1F4}"));
        assert!(contains_flag("\u{1F1F3}\u{1F1F4}"));
        assert!(is_flag_sequence(&['\u{1F1F3}', '\u{1F1F4}']));
        assert_eq!(to_emoji_presentation("\u{267B}"), "\u{267B}\u{FE0F}");
    }

    #[test]
    fn loaded_tables_agree_with_bundled() {
        let loaded = LOADED.as_tables();
        let text = "sun \u{2600} earth \u{1F30D}\u{FE0F} keycap 7\u{FE0F}\u{20E3}";
        assert_eq!(loaded.contains_emoji(text), contains_emoji(text));
        assert_eq!(
            loaded.to_text_presentation(text),
            to_text_presentation(text)
        );
        assert_eq!(
            loaded.to_emoji_presentation(text),
            to_emoji_presentation(text)
        );
    }

    #[test]
    fn tables_can_be_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let text = format!("{}\u{FE0F}\u{20E3} \u{23F3}", i);
                    (
                        LOADED.as_tables().contains_emoji(&text),
                        LOADED.as_tables().to_text_presentation(&text),
                    )
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let (found, text) = handle.join().unwrap();
            assert!(found);
            assert_eq!(text, format!("{}\u{20E3} \u{23F3}\u{FE0E}", i));
        }
    }
}
