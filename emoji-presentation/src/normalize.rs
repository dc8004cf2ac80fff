use crate::sequence::{
    is_keycap_base, is_presentation_selector, EMOJI_SELECTOR, KEYCAP,
    TEXT_SELECTOR,
};
use crate::tables::EmojiTables;

/// The presentation to normalize eligible codepoints to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Presentation {
    /// Monochrome, text style rendering, selected by U+FE0E.
    Text,
    /// Colorful, emoji style rendering, selected by U+FE0F.
    Emoji,
}

impl Presentation {
    /// The variation selector requesting this presentation.
    pub fn selector(&self) -> char {
        match *self {
            Presentation::Text => TEXT_SELECTOR,
            Presentation::Emoji => EMOJI_SELECTOR,
        }
    }
}

impl<'a> EmojiTables<'a> {
    /// Rewrite `text` such that every codepoint with a registered variation
    /// sequence is presented as text.
    ///
    /// Each eligible codepoint is followed by exactly one U+FE0E, replacing
    /// the selector that was there, if any. Keycap bases (`0`-`9`, `#`, `*`)
    /// instead lose their selectors entirely and keep a directly following
    /// U+20E3. Everything else is copied through unchanged.
    ///
    /// Modifier and ZWJ sequences are not recognized. An eligible codepoint
    /// still gets U+FE0E when a skin tone or U+200D follows it, so
    /// `\u{1F44D}\u{1F3FD}` becomes `\u{1F44D}\u{FE0E}\u{1F3FD}`.
    pub fn to_text_presentation(&self, text: &str) -> String {
        self.normalize(text, Presentation::Text)
    }

    /// Rewrite `text` such that every codepoint with a registered variation
    /// sequence is presented as emoji.
    ///
    /// Each eligible codepoint is followed by exactly one U+FE0F, replacing
    /// the selector that was there, if any. A keycap base keeps a complete
    /// keycap sequence (base, U+FE0F, U+20E3) as is, and otherwise loses its
    /// selectors. Everything else is copied through unchanged.
    ///
    /// As with `to_text_presentation`, a selector is inserted after an
    /// eligible codepoint even when a skin tone or U+200D follows it.
    pub fn to_emoji_presentation(&self, text: &str) -> String {
        self.normalize(text, Presentation::Emoji)
    }

    /// Rewrite `text` to the given presentation.
    ///
    /// This is the shared implementation of `to_text_presentation` and
    /// `to_emoji_presentation`. Normalizing twice in the same direction gives
    /// the same result as normalizing once.
    pub fn normalize(&self, text: &str, style: Presentation) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        while let Some((start, cp)) = self.find_eligible(text, cursor) {
            out.push_str(&text[cursor..start]);
            let end = start + cp.len_utf8();
            let rest = &text[end..];
            let consumed = if is_keycap_base(cp) {
                push_keycap(&mut out, cp, rest, style)
            } else {
                out.push(cp);
                out.push(style.selector());
                match rest.chars().next() {
                    Some(c) if is_presentation_selector(c) => c.len_utf8(),
                    _ => 0,
                }
            };
            cursor = end + consumed;
        }
        out.push_str(&text[cursor..]);
        out
    }

    /// Find the first eligible codepoint at or after the byte offset `from`.
    fn find_eligible(&self, text: &str, from: usize) -> Option<(usize, char)> {
        let eligible = self.variation_eligible();
        text[from..]
            .char_indices()
            .find(|&(_, cp)| eligible.contains_char(cp))
            .map(|(i, cp)| (from + i, cp))
    }
}

/// Write the keycap base `cp` to `out` in the requested style and return the
/// number of bytes of `rest`, the text following `cp`, that were consumed.
///
/// Every selector directly following the base is consumed. A U+20E3 after
/// them is consumed in text style, while in emoji style it is only consumed
/// as part of the complete sequence base, U+FE0F, U+20E3. An unconsumed
/// U+20E3 is copied through by the caller like any other codepoint.
fn push_keycap(
    out: &mut String,
    cp: char,
    rest: &str,
    style: Presentation,
) -> usize {
    let selectors = rest
        .find(|c: char| !is_presentation_selector(c))
        .unwrap_or(rest.len());
    let has_keycap = rest[selectors..].starts_with(KEYCAP);

    out.push(cp);
    match style {
        Presentation::Text if has_keycap => {
            out.push(KEYCAP);
            selectors + KEYCAP.len_utf8()
        }
        Presentation::Emoji
            if has_keycap && &rest[..selectors] == "\u{FE0F}" =>
        {
            out.push(EMOJI_SELECTOR);
            out.push(KEYCAP);
            selectors + KEYCAP.len_utf8()
        }
        Presentation::Text | Presentation::Emoji => selectors,
    }
}
