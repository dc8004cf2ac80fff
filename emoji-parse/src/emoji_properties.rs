use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::common::{
    emoji_file_path, parse_codepoint_association, CodepointIter, Codepoints,
    UcdFile, UcdFileByCodepoint,
};
use crate::error::Error;

/// A single row in the `emoji-data.txt` file.
///
/// Each row assigns one binary emoji property, e.g., `Emoji_Presentation`,
/// to a codepoint or range of codepoints.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EmojiProperty {
    /// The codepoint or codepoint range for this entry.
    pub codepoints: Codepoints,
    /// The property name assigned to the codepoints in this entry.
    pub property: String,
}

impl EmojiProperty {
    /// Returns true if this row assigns the property with the given name.
    pub fn is(&self, property: &str) -> bool {
        self.property == property
    }
}

impl UcdFile for EmojiProperty {
    fn relative_file_path() -> &'static Path {
        Path::new("emoji/emoji-data.txt")
    }

    fn file_path<P: AsRef<Path>>(ucd_dir: P) -> PathBuf {
        emoji_file_path(ucd_dir.as_ref(), "emoji-data.txt")
    }
}

impl UcdFileByCodepoint for EmojiProperty {
    fn codepoints(&self) -> CodepointIter {
        self.codepoints.into_iter()
    }
}

impl FromStr for EmojiProperty {
    type Err = Error;

    fn from_str(line: &str) -> Result<EmojiProperty, Error> {
        let (codepoints, property) = parse_codepoint_association(line)?;
        Ok(EmojiProperty { codepoints, property: property.to_string() })
    }
}
