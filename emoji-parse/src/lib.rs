/*!
A library for parsing the emoji data files of the Unicode character database.

Two files are supported: `emoji-data.txt`, which assigns the emoji properties
such as `Emoji_Presentation` to codepoints, and
`emoji-variation-sequences.txt`, which lists the codepoints whose
presentation may be chosen with a variation selector. Since Unicode 13, both
live in the `emoji` subdirectory of the UCD. Older layouts that keep them at
the top level are also found.

```no_run
use emoji_parse::EmojiProperty;

let rows = emoji_parse::parse::<_, EmojiProperty>("/path/to/ucd")?;
let presentation = rows
    .iter()
    .filter(|row| row.property == "Emoji_Presentation")
    .count();
println!("{} Emoji_Presentation rows", presentation);
# Ok::<(), emoji_parse::Error>(())
```
*/

#![deny(missing_docs)]

pub use crate::common::{
    parse, parse_by_codepoint, parse_many_by_codepoint, Codepoint,
    CodepointIter, CodepointRange, Codepoints, UcdFile, UcdFileByCodepoint,
    UcdLineParser,
};
pub use crate::error::{Error, ErrorKind};

pub use crate::emoji_properties::EmojiProperty;
pub use crate::emoji_variation_sequences::{
    EmojiVariationSequence, VariationStyle,
};

macro_rules! err {
    ($($tt:tt)*) => {
        Err(crate::error::Error::parse(format!($($tt)*)))
    }
}

mod common;
mod error;

mod emoji_properties;
mod emoji_variation_sequences;
