use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

/// Parse every row of a particular emoji data file in the given UCD
/// directory.
pub fn parse<P, D>(ucd_dir: P) -> Result<Vec<D>, Error>
where
    P: AsRef<Path>,
    D: UcdFile,
{
    D::from_dir(ucd_dir)?.collect()
}

/// Parse every row of a particular emoji data file, keyed by codepoint.
///
/// If a codepoint is mentioned by more than one row, the last row wins.
pub fn parse_by_codepoint<P, D>(
    ucd_dir: P,
) -> Result<BTreeMap<Codepoint, D>, Error>
where
    P: AsRef<Path>,
    D: UcdFileByCodepoint,
{
    let mut map = BTreeMap::new();
    for result in D::from_dir(ucd_dir)? {
        let row = result?;
        for cp in row.codepoints() {
            map.insert(cp, row.clone());
        }
    }
    Ok(map)
}

/// Parse every row of a particular emoji data file, grouping all rows that
/// mention a codepoint under that codepoint.
pub fn parse_many_by_codepoint<P, D>(
    ucd_dir: P,
) -> Result<BTreeMap<Codepoint, Vec<D>>, Error>
where
    P: AsRef<Path>,
    D: UcdFileByCodepoint,
{
    let mut map: BTreeMap<Codepoint, Vec<D>> = BTreeMap::new();
    for result in D::from_dir(ucd_dir)? {
        let row = result?;
        for cp in row.codepoints() {
            map.entry(cp).or_insert_with(Vec::new).push(row.clone());
        }
    }
    Ok(map)
}

/// A single emoji data file, where each non-comment line parses to one row.
pub trait UcdFile:
    Clone + fmt::Debug + Default + Eq + FromStr<Err = Error> + PartialEq
{
    /// The path of this file relative to the root of a UCD directory.
    fn relative_file_path() -> &'static Path;

    /// The full path of this file within the given UCD directory.
    ///
    /// Implementations may override this to look in legacy locations.
    fn file_path<P: AsRef<Path>>(ucd_dir: P) -> PathBuf {
        ucd_dir.as_ref().join(Self::relative_file_path())
    }

    /// Open this file within the given UCD directory and return an iterator
    /// over its rows.
    fn from_dir<P: AsRef<Path>>(
        ucd_dir: P,
    ) -> Result<UcdLineParser<File, Self>, Error> {
        UcdLineParser::from_path(Self::file_path(ucd_dir))
    }
}

/// A file whose rows are each associated with one or more codepoints.
pub trait UcdFileByCodepoint: UcdFile {
    /// The codepoints covered by this row.
    fn codepoints(&self) -> CodepointIter;
}

/// An iterator over the rows of an emoji data file.
///
/// Blank lines and lines starting with `#` are skipped. Errors are annotated
/// with the line number and, if known, the file path.
#[derive(Debug)]
pub struct UcdLineParser<R, D> {
    path: Option<PathBuf>,
    rdr: io::BufReader<R>,
    line: String,
    line_number: u64,
    _data: PhantomData<D>,
}

impl<D> UcdLineParser<File, D> {
    pub(crate) fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<UcdLineParser<File, D>, Error> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(e, Some(path.to_path_buf())))?;
        Ok(UcdLineParser::new(Some(path.to_path_buf()), file))
    }
}

impl<R: io::Read, D> UcdLineParser<R, D> {
    /// Create a parser reading rows from `rdr`. The path, if given, is only
    /// used in error messages.
    pub fn new(path: Option<PathBuf>, rdr: R) -> UcdLineParser<R, D> {
        UcdLineParser {
            path,
            rdr: io::BufReader::new(rdr),
            line: String::new(),
            line_number: 0,
            _data: PhantomData,
        }
    }
}

impl<R: io::Read, D: FromStr<Err = Error>> Iterator for UcdLineParser<R, D> {
    type Item = Result<D, Error>;

    fn next(&mut self) -> Option<Result<D, Error>> {
        loop {
            self.line_number += 1;
            self.line.clear();
            let n = match self.rdr.read_line(&mut self.line) {
                Err(err) => {
                    return Some(Err(Error::io(err, self.path.clone())));
                }
                Ok(n) => n,
            };
            if n == 0 {
                return None;
            }
            let trimmed = self.line.trim_start_matches('\u{FEFF}').trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                break;
            }
        }
        let line_number = self.line_number;
        let path = self.path.clone();
        Some(self.line.trim_start_matches('\u{FEFF}').parse().map_err(
            |mut err: Error| {
                err.line = Some(line_number);
                err.path = path;
                err
            },
        ))
    }
}

/// Locate the emoji data file named `name` within a UCD directory.
///
/// UCDs from 13.0.0 on keep emoji data in an `emoji` subdirectory, while
/// older layouts keep it at the top level. When neither exists, the standard
/// location is returned so that it shows up in the resulting error.
pub(crate) fn emoji_file_path(ucd_dir: &Path, name: &str) -> PathBuf {
    let std = ucd_dir.join("emoji").join(name);
    if std.exists() {
        return std;
    }
    let legacy = ucd_dir.join(name);
    if legacy.exists() {
        legacy
    } else {
        std
    }
}

/// Parse a line of the form `codepoints ; value # comment`, returning the
/// codepoints and the trimmed value.
pub(crate) fn parse_codepoint_association(
    line: &str,
) -> Result<(Codepoints, &str), Error> {
    lazy_static! {
        static ref PARTS: Regex = Regex::new(
            r"(?x)
            ^
            \s*(?P<codepoints>[^\s;]+)\s*;
            \s*(?P<property>[^;\x23]+)\s*
            "
        )
        .unwrap();
    };

    let caps = match PARTS.captures(line.trim()) {
        Some(caps) => caps,
        None => return err!("invalid codepoint association: '{}'", line),
    };
    let property = caps.name("property").unwrap().as_str().trim();
    if property.is_empty() {
        return err!("missing property name: '{}'", line);
    }
    Ok((caps.name("codepoints").unwrap().as_str().parse()?, property))
}

/// A single codepoint, or a closed range of codepoints.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Codepoints {
    /// A single codepoint.
    Single(Codepoint),
    /// An inclusive range of codepoints.
    Range(CodepointRange),
}

impl Default for Codepoints {
    fn default() -> Codepoints {
        Codepoints::Single(Codepoint::default())
    }
}

impl IntoIterator for Codepoints {
    type IntoIter = CodepointIter;
    type Item = Codepoint;

    fn into_iter(self) -> CodepointIter {
        match self {
            Codepoints::Single(x) => x.into_iter(),
            Codepoints::Range(x) => x.into_iter(),
        }
    }
}

impl FromStr for Codepoints {
    type Err = Error;

    fn from_str(s: &str) -> Result<Codepoints, Error> {
        if s.contains("..") {
            CodepointRange::from_str(s).map(Codepoints::Range)
        } else {
            Codepoint::from_str(s).map(Codepoints::Single)
        }
    }
}

impl fmt::Display for Codepoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Codepoints::Single(ref x) => x.fmt(f),
            Codepoints::Range(ref x) => x.fmt(f),
        }
    }
}

impl PartialEq<u32> for Codepoints {
    fn eq(&self, other: &u32) -> bool {
        match *self {
            Codepoints::Single(ref x) => x == other,
            Codepoints::Range(ref x) => x == &(*other, *other),
        }
    }
}

impl PartialEq<(u32, u32)> for Codepoints {
    fn eq(&self, other: &(u32, u32)) -> bool {
        match *self {
            Codepoints::Single(ref x) => &(x.value(), x.value()) == other,
            Codepoints::Range(ref x) => x == other,
        }
    }
}

/// An inclusive range of codepoints, written as `START..END` in data files.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CodepointRange {
    /// The first codepoint in the range.
    pub start: Codepoint,
    /// The last codepoint in the range.
    pub end: Codepoint,
}

impl IntoIterator for CodepointRange {
    type IntoIter = CodepointIter;
    type Item = Codepoint;

    fn into_iter(self) -> CodepointIter {
        CodepointIter { next: self.start.value(), range: self }
    }
}

impl FromStr for CodepointRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<CodepointRange, Error> {
        lazy_static! {
            static ref PARTS: Regex = Regex::new(
                r"^(?P<start>[A-Fa-f0-9]+)\.\.(?P<end>[A-Fa-f0-9]+)$"
            )
            .unwrap();
        }
        let caps = match PARTS.captures(s) {
            Some(caps) => caps,
            None => return err!("invalid codepoint range: '{}'", s),
        };
        let start = caps["start"].parse()?;
        let end = caps["end"].parse()?;
        if start > end {
            return err!("codepoint range '{}' ends before it starts", s);
        }
        Ok(CodepointRange { start, end })
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl PartialEq<(u32, u32)> for CodepointRange {
    fn eq(&self, other: &(u32, u32)) -> bool {
        (self.start.value(), self.end.value()) == *other
    }
}

/// A single Unicode codepoint, which may be a surrogate.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Codepoint(u32);

impl Codepoint {
    /// Create a codepoint, failing if `n` is greater than `0x10FFFF`.
    pub fn from_u32(n: u32) -> Result<Codepoint, Error> {
        if n > 0x10FFFF {
            err!("{:x} is not a valid Unicode codepoint", n)
        } else {
            Ok(Codepoint(n))
        }
    }

    /// The integer value of this codepoint.
    pub fn value(self) -> u32 {
        self.0
    }

    /// This codepoint as a `char`, unless it is a surrogate.
    pub fn scalar(self) -> Option<char> {
        ::std::char::from_u32(self.0)
    }
}

impl IntoIterator for Codepoint {
    type IntoIter = CodepointIter;
    type Item = Codepoint;

    fn into_iter(self) -> CodepointIter {
        let range = CodepointRange { start: self, end: self };
        range.into_iter()
    }
}

impl FromStr for Codepoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Codepoint, Error> {
        match u32::from_str_radix(s, 16) {
            Ok(n) => Codepoint::from_u32(n),
            Err(err) => {
                err!("failed to parse '{}' as a hex codepoint: {}", s, err)
            }
        }
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

impl PartialEq<u32> for Codepoint {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Codepoint> for u32 {
    fn eq(&self, other: &Codepoint) -> bool {
        *self == other.0
    }
}

/// An iterator over the codepoints in a range.
#[derive(Clone, Debug)]
pub struct CodepointIter {
    next: u32,
    range: CodepointRange,
}

impl Iterator for CodepointIter {
    type Item = Codepoint;

    fn next(&mut self) -> Option<Codepoint> {
        if self.next > self.range.end.value() {
            return None;
        }
        let current = self.next;
        self.next += 1;
        Some(Codepoint(current))
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::process;

    use crate::emoji_properties::EmojiProperty;
    use crate::error::ErrorKind;

    use super::{
        parse_by_codepoint, parse_codepoint_association, Codepoint,
        CodepointRange, Codepoints, UcdLineParser,
    };

    #[test]
    fn codepoint_hex() {
        let cp: Codepoint = "1F600".parse().unwrap();
        assert_eq!(cp, 0x1F600);
        assert_eq!(cp.to_string(), "1F600");
        assert_eq!("A9".parse::<Codepoint>().unwrap().to_string(), "00A9");
        assert_eq!(cp.scalar(), Some('\u{1F600}'));
        assert_eq!("D800".parse::<Codepoint>().unwrap().scalar(), None);
    }

    #[test]
    fn codepoint_out_of_range() {
        assert!("110000".parse::<Codepoint>().is_err());
        assert!("xyz".parse::<Codepoint>().is_err());
        assert!(Codepoint::from_u32(0x10FFFF).is_ok());
    }

    #[test]
    fn codepoint_range() {
        let range: CodepointRange = "1F3FB..1F3FF".parse().unwrap();
        assert_eq!(range, (0x1F3FB, 0x1F3FF));
        assert_eq!(range.to_string(), "1F3FB..1F3FF");
        let all: Vec<u32> = range.into_iter().map(|cp| cp.value()).collect();
        assert_eq!(all, vec![0x1F3FB, 0x1F3FC, 0x1F3FD, 0x1F3FE, 0x1F3FF]);

        assert!("1F3FF..1F3FB".parse::<CodepointRange>().is_err());
        assert!("1F3FB..".parse::<CodepointRange>().is_err());
    }

    #[test]
    fn codepoints_compare() {
        let single: Codepoints = "231A".parse().unwrap();
        assert_eq!(single, 0x231A);
        assert_eq!(single, (0x231A, 0x231A));
        assert_eq!(single.into_iter().count(), 1);

        let range: Codepoints = "231A..231B".parse().unwrap();
        assert_eq!(range, (0x231A, 0x231B));
        assert!(range != 0x231A);
    }

    #[test]
    fn association() {
        let (cps, prop) =
            parse_codepoint_association("  1F1E6..1F1FF ; Emoji_Component # x")
                .unwrap();
        assert_eq!(cps, (0x1F1E6, 0x1F1FF));
        assert_eq!(prop, "Emoji_Component");

        assert!(parse_codepoint_association("1F1E6").is_err());
        assert!(parse_codepoint_association("1F1E6 ; # nothing").is_err());
    }

    #[test]
    fn association_borrows_from_line() {
        fn property_of(line: &str) -> &str {
            parse_codepoint_association(line).unwrap().1
        }

        let line = String::from("1F44D ; Emoji_Modifier_Base # thumbs up");
        let prop = property_of(&line);
        assert_eq!(prop, "Emoji_Modifier_Base");
        assert_eq!(prop.as_ptr(), line[8..].as_ptr());
    }

    #[test]
    fn by_codepoint_keeps_last_row() {
        let root = env::temp_dir()
            .join(format!("emoji-parse-by-codepoint-{}", process::id()));
        fs::create_dir_all(root.join("emoji")).unwrap();
        let data = "\
231A..231B ; Emoji # watch..hourglass done
231B       ; Emoji_Presentation # hourglass done
";
        fs::write(root.join("emoji").join("emoji-data.txt"), data).unwrap();

        let map = parse_by_codepoint::<_, EmojiProperty>(&root).unwrap();
        fs::remove_dir_all(&root).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&Codepoint::from_u32(0x231A).unwrap()].property, "Emoji");
        assert_eq!(
            map[&Codepoint::from_u32(0x231B).unwrap()].property,
            "Emoji_Presentation"
        );
    }

    #[test]
    fn line_parser_skips_comments_and_reports_lines() {
        let data = "\
# emoji-data.txt

231A..231B    ; Emoji # watch
  # indented comment
zzzz          ; Emoji
";
        let mut rows = UcdLineParser::<_, EmojiProperty>::new(
            None,
            io::Cursor::new(data),
        );
        let first = rows.next().unwrap().unwrap();
        assert_eq!(first.codepoints, (0x231A, 0x231B));

        let err = rows.next().unwrap().unwrap_err();
        assert_eq!(err.line(), Some(5));
        match *err.kind() {
            ErrorKind::Parse(_) => {}
            ref kind => panic!("unexpected error: {:?}", kind),
        }
        assert!(rows.next().is_none());
    }
}
