use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Error;
use crate::range::{RangeTable, RangeTableOwned};
use crate::unicode_tables::emoji;

/// One of the four emoji property tables used for classification.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Table {
    /// Codepoints with `Emoji_Presentation=Yes` that are not emoji
    /// components. Each of these is an emoji on its own.
    Presentable,
    /// Codepoints with `Emoji=Yes` and `Emoji_Presentation=No`. These are
    /// rendered as text unless followed by U+FE0F.
    TextDefault,
    /// Codepoints with `Emoji_Modifier_Base=Yes`, except U+1F46A FAMILY.
    ModifierBase,
    /// Codepoints that have both a text and an emoji variation sequence
    /// registered in `emoji-variation-sequences.txt`.
    VariationEligible,
}

impl Table {
    /// All tables, in a fixed order.
    pub const ALL: [Table; 4] = [
        Table::Presentable,
        Table::TextDefault,
        Table::ModifierBase,
        Table::VariationEligible,
    ];

    /// The snake case name of this table.
    pub fn name(&self) -> &'static str {
        match *self {
            Table::Presentable => "presentable",
            Table::TextDefault => "text_default",
            Table::ModifierBase => "modifier_base",
            Table::VariationEligible => "variation_eligible",
        }
    }

    /// Look up a table by the name returned from `Table::name`.
    pub fn from_name(name: &str) -> Option<Table> {
        Table::ALL.iter().cloned().find(|t| t.name() == name)
    }

    /// The name of the file, within a table directory, holding the binary
    /// encoding of this table.
    pub fn file_name(&self) -> String {
        format!("{}.bin", self.name())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The set of range tables that classification and normalization consult.
///
/// This is cheap to copy. The tables compiled into this crate are available
/// via `EmojiTables::bundled`, while tables loaded at runtime are owned by an
/// `EmojiTablesOwned`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EmojiTables<'a> {
    presentable: RangeTable<'a>,
    text_default: RangeTable<'a>,
    modifier_base: RangeTable<'a>,
    variation_eligible: RangeTable<'a>,
}

impl EmojiTables<'static> {
    /// The tables generated from the Unicode 16.0.0 emoji data files.
    pub const fn bundled() -> EmojiTables<'static> {
        EmojiTables {
            presentable: RangeTable::new(emoji::PRESENTABLE),
            text_default: RangeTable::new(emoji::TEXT_DEFAULT),
            modifier_base: RangeTable::new(emoji::MODIFIER_BASE),
            variation_eligible: RangeTable::new(emoji::VARIATION_ELIGIBLE),
        }
    }
}

impl<'a> EmojiTables<'a> {
    /// Assemble a set of tables from its four parts.
    pub fn new(
        presentable: RangeTable<'a>,
        text_default: RangeTable<'a>,
        modifier_base: RangeTable<'a>,
        variation_eligible: RangeTable<'a>,
    ) -> EmojiTables<'a> {
        EmojiTables {
            presentable,
            text_default,
            modifier_base,
            variation_eligible,
        }
    }

    /// Return the given table.
    pub fn get(&self, table: Table) -> RangeTable<'a> {
        match table {
            Table::Presentable => self.presentable,
            Table::TextDefault => self.text_default,
            Table::ModifierBase => self.modifier_base,
            Table::VariationEligible => self.variation_eligible,
        }
    }

    /// Single codepoint emoji.
    pub fn presentable(&self) -> RangeTable<'a> {
        self.presentable
    }

    /// Emoji that default to text presentation.
    pub fn text_default(&self) -> RangeTable<'a> {
        self.text_default
    }

    /// Emoji that accept a skin tone modifier.
    pub fn modifier_base(&self) -> RangeTable<'a> {
        self.modifier_base
    }

    /// Codepoints whose presentation can be selected with U+FE0E or U+FE0F.
    pub fn variation_eligible(&self) -> RangeTable<'a> {
        self.variation_eligible
    }
}

impl Default for EmojiTables<'static> {
    fn default() -> EmojiTables<'static> {
        EmojiTables::bundled()
    }
}

/// An owned set of range tables, typically loaded from binary files produced
/// by `emoji-generate emoji-tables --binary-dir`.
#[derive(Clone, Debug)]
pub struct EmojiTablesOwned {
    presentable: RangeTableOwned,
    text_default: RangeTableOwned,
    modifier_base: RangeTableOwned,
    variation_eligible: RangeTableOwned,
}

impl EmojiTablesOwned {
    /// Decode and validate four encoded range tables.
    pub fn from_bytes(
        presentable: &[u8],
        text_default: &[u8],
        modifier_base: &[u8],
        variation_eligible: &[u8],
    ) -> Result<EmojiTablesOwned, Error> {
        Ok(EmojiTablesOwned {
            presentable: RangeTableOwned::from_bytes(presentable)?,
            text_default: RangeTableOwned::from_bytes(text_default)?,
            modifier_base: RangeTableOwned::from_bytes(modifier_base)?,
            variation_eligible: RangeTableOwned::from_bytes(
                variation_eligible,
            )?,
        })
    }

    /// Read all four tables from the given directory.
    ///
    /// Each table is read from the file named by `Table::file_name`. Errors
    /// carry the path of the file that could not be read or decoded.
    pub fn from_dir<P: AsRef<Path>>(
        dir: P,
    ) -> Result<EmojiTablesOwned, Error> {
        let dir = dir.as_ref();
        Ok(EmojiTablesOwned {
            presentable: read_table(dir, Table::Presentable)?,
            text_default: read_table(dir, Table::TextDefault)?,
            modifier_base: read_table(dir, Table::ModifierBase)?,
            variation_eligible: read_table(dir, Table::VariationEligible)?,
        })
    }

    /// Borrow these tables for classification and normalization.
    pub fn as_tables(&self) -> EmojiTables<'_> {
        EmojiTables::new(
            self.presentable.as_table(),
            self.text_default.as_table(),
            self.modifier_base.as_table(),
            self.variation_eligible.as_table(),
        )
    }
}

fn read_table(dir: &Path, table: Table) -> Result<RangeTableOwned, Error> {
    let path = dir.join(table.file_name());
    let bytes = fs::read(&path).map_err(|e| Error::from(e).with_path(&path))?;
    let owned =
        RangeTableOwned::from_bytes(&bytes).map_err(|e| e.with_path(&path))?;
    debug!(
        "loaded {} table: {} ranges, {} codepoints from {}",
        table,
        owned.as_table().len(),
        owned.as_table().codepoint_count(),
        path.display(),
    );
    Ok(owned)
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::process;

    use crate::error::ErrorKind;
    use crate::range::validate;
    use crate::unicode_tables::emoji::BY_NAME;

    use super::{EmojiTables, EmojiTablesOwned, Table};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir()
            .join(format!("emoji-presentation-{}-{}", name, process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn bundled_tables_are_valid() {
        for &(name, ranges) in BY_NAME {
            validate(ranges).unwrap_or_else(|err| panic!("{}: {}", name, err));
        }
    }

    #[test]
    fn by_name_matches_table_names() {
        let bundled = EmojiTables::bundled();
        assert_eq!(BY_NAME.len(), Table::ALL.len());
        for &(name, ranges) in BY_NAME {
            let table = Table::from_name(name).unwrap();
            assert_eq!(bundled.get(table).ranges(), ranges);
        }
        assert_eq!(Table::from_name("emoji"), None);
    }

    #[test]
    fn from_bytes_round_trips_bundled() {
        let bundled = EmojiTables::bundled();
        let owned = EmojiTablesOwned::from_bytes(
            &bundled.presentable().to_bytes(),
            &bundled.text_default().to_bytes(),
            &bundled.modifier_base().to_bytes(),
            &bundled.variation_eligible().to_bytes(),
        )
        .unwrap();
        assert_eq!(owned.as_tables(), bundled);
    }

    #[test]
    fn from_dir_reads_every_table() {
        let dir = temp_dir("from-dir");
        let bundled = EmojiTables::bundled();
        for &table in &Table::ALL {
            let path = dir.join(table.file_name());
            bundled.get(table).write_to(fs::File::create(path).unwrap()).unwrap();
        }
        let owned = EmojiTablesOwned::from_dir(&dir).unwrap();
        assert_eq!(owned.as_tables(), bundled);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn from_dir_reports_path_of_bad_table() {
        let dir = temp_dir("bad-table");
        let bundled = EmojiTables::bundled();
        for &table in &Table::ALL {
            let path = dir.join(table.file_name());
            bundled.get(table).write_to(fs::File::create(path).unwrap()).unwrap();
        }
        let bad = dir.join(Table::ModifierBase.file_name());
        fs::write(&bad, &[1, 2, 3]).unwrap();

        let err = EmojiTablesOwned::from_dir(&dir).unwrap_err();
        assert_eq!(err.path(), Some(&*bad));
        match *err.kind() {
            ErrorKind::InvalidLength(3) => {}
            ref kind => panic!("unexpected error: {:?}", kind),
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn from_dir_missing_file_is_io_error() {
        let dir = temp_dir("missing");
        let err = EmojiTablesOwned::from_dir(&dir).unwrap_err();
        assert!(err.is_io_error());
        assert_eq!(
            err.path(),
            Some(&*dir.join(Table::Presentable.file_name()))
        );
        fs::remove_dir_all(&dir).unwrap();
    }
}
