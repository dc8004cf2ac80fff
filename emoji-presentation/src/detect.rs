use crate::sequence::{is_flag_pair, lookahead};
use crate::tables::EmojiTables;

impl<'a> EmojiTables<'a> {
    /// Returns true if `cp` is an emoji by itself.
    ///
    /// These are the default emoji presentation characters ([ED-6]) that are
    /// not emoji components. Characters that default to text presentation
    /// ([ED-7]), like U+2600 BLACK SUN WITH RAYS, are not matched since they
    /// only become emoji when followed by U+FE0F, which can't be seen from a
    /// single codepoint.
    ///
    /// [ED-6]: https://www.unicode.org/reports/tr51/#def_emoji_presentation
    /// [ED-7]: https://www.unicode.org/reports/tr51/#def_text_presentation
    pub fn is_single_character_emoji(&self, cp: char) -> bool {
        self.presentable().contains_char(cp)
    }

    /// Returns true if `text` contains at least one emoji.
    ///
    /// An emoji is a single character emoji or any of the sequences
    /// recognized by `EmojiTables::sequence_at`: presentation, modifier,
    /// flag and keycap sequences. Scanning stops at the first match.
    pub fn contains_emoji(&self, text: &str) -> bool {
        let mut chars = text.chars();
        while let Some(cp) = chars.next() {
            if self.is_single_character_emoji(cp) {
                return true;
            }
            let (next, next2) = lookahead(&chars);
            if next.is_none() {
                break;
            }
            if self.sequence_at(cp, next, next2).is_some() {
                return true;
            }
        }
        false
    }
}

/// Returns true if `text` contains at least one emoji flag sequence.
///
/// As with `is_flag_sequence`, any two consecutive regional indicators count.
pub fn contains_flag(text: &str) -> bool {
    let mut chars = text.chars();
    while let Some(cp) = chars.next() {
        if is_flag_pair(cp, chars.clone().next()) {
            return true;
        }
    }
    false
}
