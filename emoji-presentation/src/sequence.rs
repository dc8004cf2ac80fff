use std::str::Chars;

use crate::tables::EmojiTables;

/// U+FE0E VARIATION SELECTOR-15, which requests text presentation.
pub const TEXT_SELECTOR: char = '\u{FE0E}';

/// U+FE0F VARIATION SELECTOR-16, which requests emoji presentation.
pub const EMOJI_SELECTOR: char = '\u{FE0F}';

/// U+1F3FB EMOJI MODIFIER FITZPATRICK TYPE-1-2, the lightest skin tone.
pub const SKIN_TONE_LIGHT: char = '\u{1F3FB}';

/// U+1F3FF EMOJI MODIFIER FITZPATRICK TYPE-6, the darkest skin tone.
pub const SKIN_TONE_DARK: char = '\u{1F3FF}';

/// U+1F1E6 REGIONAL INDICATOR SYMBOL LETTER A.
pub const REGIONAL_INDICATOR_A: char = '\u{1F1E6}';

/// U+1F1FF REGIONAL INDICATOR SYMBOL LETTER Z.
pub const REGIONAL_INDICATOR_Z: char = '\u{1F1FF}';

/// U+20E3 COMBINING ENCLOSING KEYCAP.
pub const KEYCAP: char = '\u{20E3}';

/// The shape of a multi-codepoint emoji sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sequence {
    /// Two regional indicators, e.g. 🇩🇪 ([ED-14]).
    ///
    /// [ED-14]: https://www.unicode.org/reports/tr51/#def_emoji_flag_sequence
    Flag,
    /// `0`-`9`, `#` or `*` followed by U+FE0F and U+20E3 ([ED-14c]).
    ///
    /// [ED-14c]: https://www.unicode.org/reports/tr51/#def_emoji_keycap_sequence
    Keycap,
    /// A text default emoji followed by U+FE0F ([ED-9a]).
    ///
    /// [ED-9a]: https://www.unicode.org/reports/tr51/#def_emoji_presentation_sequence
    Presentation,
    /// A modifier base followed by U+FE0F or a skin tone ([ED-13]).
    ///
    /// [ED-13]: https://www.unicode.org/reports/tr51/#def_emoji_modifier_sequence
    Modifier,
}

impl Sequence {
    /// The number of codepoints making up a sequence of this shape.
    pub fn codepoint_len(&self) -> usize {
        match *self {
            Sequence::Keycap => 3,
            Sequence::Flag | Sequence::Presentation | Sequence::Modifier => 2,
        }
    }
}

/// Returns true for U+FE0E and U+FE0F.
pub fn is_presentation_selector(c: char) -> bool {
    c == TEXT_SELECTOR || c == EMOJI_SELECTOR
}

/// Returns true for the five skin tone modifiers.
pub fn is_skin_tone(c: char) -> bool {
    SKIN_TONE_LIGHT <= c && c <= SKIN_TONE_DARK
}

/// Returns true for the 26 regional indicator symbols.
pub fn is_regional_indicator(c: char) -> bool {
    REGIONAL_INDICATOR_A <= c && c <= REGIONAL_INDICATOR_Z
}

/// Returns true for the characters that may start a keycap sequence.
pub fn is_keycap_base(c: char) -> bool {
    match c {
        '0'..='9' | '#' | '*' => true,
        _ => false,
    }
}

/// Returns true if and only if the first two codepoints of the given slice
/// form an emoji flag sequence.
///
/// Use `is_flag_sequence_at` to test a position other than the start. Fewer
/// than two codepoints never form a flag. Whether the two letters name an
/// actual region is not checked.
pub fn is_flag_sequence(cps: &[char]) -> bool {
    match *cps {
        [first, second, ..] => is_flag_pair(first, Some(second)),
        _ => false,
    }
}

/// Returns true if and only if the two codepoints starting at `offset` form
/// an emoji flag sequence.
///
/// An `offset` at or past the end of `cps` is never a flag.
pub fn is_flag_sequence_at(cps: &[char], offset: usize) -> bool {
    cps.get(offset..).map_or(false, is_flag_sequence)
}

/// Returns true if `cp` and `next` are both regional indicators.
pub fn is_flag_pair(cp: char, next: Option<char>) -> bool {
    match next {
        Some(next) => is_regional_indicator(cp) && is_regional_indicator(next),
        None => false,
    }
}

/// Returns true if `cp`, `next` and `next2` form the fully qualified keycap
/// sequence: a keycap base, U+FE0F and U+20E3.
pub fn is_keycap_sequence(
    cp: char,
    next: Option<char>,
    next2: Option<char>,
) -> bool {
    is_keycap_base(cp) && next == Some(EMOJI_SELECTOR) && next2 == Some(KEYCAP)
}

/// Return the next two codepoints of `chars` without advancing it.
pub(crate) fn lookahead(chars: &Chars<'_>) -> (Option<char>, Option<char>) {
    let mut ahead = chars.clone();
    let next = ahead.next();
    (next, ahead.next())
}

impl<'a> EmojiTables<'a> {
    /// Returns true if `cp` defaults to text presentation and is followed by
    /// U+FE0F.
    pub fn is_presentation_sequence(&self, cp: char, next: Option<char>) -> bool {
        next == Some(EMOJI_SELECTOR) && self.text_default().contains_char(cp)
    }

    /// Returns true if `cp` is a modifier base followed by either U+FE0F or
    /// a skin tone modifier.
    pub fn is_modifier_sequence(&self, cp: char, next: Option<char>) -> bool {
        match next {
            Some(next) if next == EMOJI_SELECTOR || is_skin_tone(next) => {
                self.modifier_base().contains_char(cp)
            }
            _ => false,
        }
    }

    /// Return the shape of the emoji sequence starting with `cp`, if any.
    ///
    /// `next` and `next2` are the two codepoints following `cp`. Each shape is
    /// independently sufficient, so the order in which they are tried only
    /// determines which shape is reported when more than one applies.
    pub fn sequence_at(
        &self,
        cp: char,
        next: Option<char>,
        next2: Option<char>,
    ) -> Option<Sequence> {
        if is_keycap_sequence(cp, next, next2) {
            Some(Sequence::Keycap)
        } else if self.is_presentation_sequence(cp, next) {
            Some(Sequence::Presentation)
        } else if self.is_modifier_sequence(cp, next) {
            Some(Sequence::Modifier)
        } else if is_flag_pair(cp, next) {
            Some(Sequence::Flag)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tables::EmojiTables;

    use super::*;

    const TABLES: EmojiTables<'static> = EmojiTables::bundled();

    #[test]
    fn flag_sequence() {
        assert!(is_flag_sequence(&['\u{1F1E9}', '\u{1F1EA}']));
        assert!(is_flag_sequence(&['\u{1F1E6}', '\u{1F1FF}', 'x']));
        // No check that the pair names a real territory.
        assert!(is_flag_sequence(&['\u{1F1FF}', '\u{1F1FF}']));

        assert!(!is_flag_sequence(&['\u{1F1E9}', 'E']));
        assert!(!is_flag_sequence(&['\u{1F1E5}', '\u{1F1E6}']));
        assert!(!is_flag_sequence(&['\u{1F1FF}', '\u{1F200}']));
    }

    #[test]
    fn flag_sequence_too_short() {
        assert!(!is_flag_sequence(&[]));
        assert!(!is_flag_sequence(&['\u{1F1E9}']));
    }

    #[test]
    fn flag_sequence_at_offset() {
        let cps: Vec<char> = "x\u{1F1EF}\u{1F1F5}".chars().collect();
        assert!(!is_flag_sequence_at(&cps, 0));
        assert!(is_flag_sequence_at(&cps, 1));
        assert!(!is_flag_sequence_at(&cps, 2));
        assert!(!is_flag_sequence_at(&cps, 3));
        assert!(!is_flag_sequence_at(&cps, 4));
        assert!(!is_flag_sequence_at(&cps, usize::MAX));
        assert!(!is_flag_sequence_at(&[], 0));
    }

    #[test]
    fn keycap_sequence() {
        for &base in &['0', '5', '9', '#', '*'] {
            assert!(is_keycap_sequence(base, Some(EMOJI_SELECTOR), Some(KEYCAP)));
        }
        assert!(!is_keycap_sequence('A', Some(EMOJI_SELECTOR), Some(KEYCAP)));
        assert!(!is_keycap_sequence('1', Some(KEYCAP), None));
        assert!(!is_keycap_sequence('1', Some(TEXT_SELECTOR), Some(KEYCAP)));
        assert!(!is_keycap_sequence('1', Some(EMOJI_SELECTOR), None));
    }

    #[test]
    fn presentation_sequence() {
        assert!(TABLES.is_presentation_sequence('\u{2600}', Some(EMOJI_SELECTOR)));
        assert!(TABLES.is_presentation_sequence('\u{267B}', Some(EMOJI_SELECTOR)));
        assert!(TABLES.is_presentation_sequence('1', Some(EMOJI_SELECTOR)));
        assert!(!TABLES.is_presentation_sequence('\u{2600}', Some(TEXT_SELECTOR)));
        assert!(!TABLES.is_presentation_sequence('\u{2600}', None));
        // Already emoji by default.
        assert!(!TABLES.is_presentation_sequence('\u{231B}', Some(EMOJI_SELECTOR)));
        assert!(!TABLES.is_presentation_sequence('A', Some(EMOJI_SELECTOR)));
    }

    #[test]
    fn modifier_sequence() {
        let thumbs_up = '\u{1F44D}';
        for tone in 0x1F3FBu32..=0x1F3FF {
            let tone = std::char::from_u32(tone).unwrap();
            assert!(TABLES.is_modifier_sequence(thumbs_up, Some(tone)));
        }
        assert!(TABLES.is_modifier_sequence(thumbs_up, Some(EMOJI_SELECTOR)));
        assert!(TABLES.is_modifier_sequence('\u{261D}', Some(SKIN_TONE_DARK)));

        assert!(!TABLES.is_modifier_sequence(thumbs_up, Some('\u{1F3FA}')));
        assert!(!TABLES.is_modifier_sequence(thumbs_up, Some('\u{1F400}')));
        assert!(!TABLES.is_modifier_sequence(thumbs_up, None));
        // FAMILY is left to multi-person ZWJ sequences.
        assert!(!TABLES.is_modifier_sequence('\u{1F46A}', Some(SKIN_TONE_LIGHT)));
        assert!(!TABLES.is_modifier_sequence('\u{1F600}', Some(SKIN_TONE_LIGHT)));
    }

    #[test]
    fn sequence_lengths() {
        let cases = [
            ('1', Some(EMOJI_SELECTOR), Some(KEYCAP), Sequence::Keycap, 3),
            ('\u{2600}', Some(EMOJI_SELECTOR), None, Sequence::Presentation, 2),
            ('\u{1F44B}', Some(SKIN_TONE_LIGHT), None, Sequence::Modifier, 2),
            ('\u{1F1FA}', Some('\u{1F1F8}'), None, Sequence::Flag, 2),
        ];
        for &(cp, next, next2, expected, len) in &cases {
            let got = TABLES.sequence_at(cp, next, next2);
            assert_eq!(got, Some(expected), "{:?}", cp);
            assert_eq!(expected.codepoint_len(), len);
        }
        assert_eq!(TABLES.sequence_at('a', Some('b'), Some('c')), None);
        assert_eq!(TABLES.sequence_at('\u{2600}', None, None), None);
    }
}
