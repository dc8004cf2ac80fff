use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::ops;
use std::path::Path;

use emoji_presentation::{EmojiTables, EmojiTablesOwned};
use log::debug;

use crate::error::Result;
use crate::writer::{Writer, WriterBuilder};

/// Wraps clap matches and provides convenient accessors to various parameters.
pub struct ArgMatches<'a>(&'a clap::ArgMatches<'a>);

impl<'a> ops::Deref for ArgMatches<'a> {
    type Target = clap::ArgMatches<'a>;
    fn deref(&self) -> &clap::ArgMatches<'a> {
        &self.0
    }
}

impl<'a> ArgMatches<'a> {
    pub fn new(matches: &'a clap::ArgMatches<'a>) -> ArgMatches<'a> {
        ArgMatches(matches)
    }

    pub fn ucd_dir(&self) -> Result<&OsStr> {
        match self.value_of_os("ucd-dir") {
            Some(x) => Ok(x),
            None => err!("missing UCD directory"),
        }
    }

    pub fn name(&self) -> &str {
        self.value_of("name").unwrap_or("BY_NAME")
    }

    /// Build a writer for the tables named by `name`, honoring the output
    /// flags shared by table generating commands.
    pub fn writer(&self, name: &str) -> Result<Writer> {
        let mut builder = WriterBuilder::new(name);
        builder
            .index_name(self.name())
            .char_literals(self.is_present("chars"));
        match self.value_of_os("binary-dir") {
            None => Ok(builder.from_stdout()),
            Some(dir) => builder.from_binary_dir(dir),
        }
    }

    /// Load the tables from `--table-dir`, if it was given.
    ///
    /// Callers fall back to `EmojiTables::bundled` when this returns `None`.
    pub fn table_dir(&self) -> Result<Option<EmojiTablesOwned>> {
        let dir = match self.value_of_os("table-dir") {
            None => return Ok(None),
            Some(dir) => Path::new(dir),
        };
        debug!("loading emoji tables from {}", dir.display());
        Ok(Some(EmojiTablesOwned::from_dir(dir)?))
    }

    /// Build a filter from the `--include` and `--exclude` flags.
    ///
    /// Every name given is passed through `canonicalize`, which should return
    /// an error for names that aren't recognized.
    pub fn filter<F: FnMut(&str) -> Result<String>>(
        &self,
        mut canonicalize: F,
    ) -> Result<Filter> {
        let include = match self.value_of("include") {
            None => None,
            Some(names) => {
                let mut set = BTreeSet::new();
                for name in split_names(names) {
                    set.insert(canonicalize(name)?);
                }
                Some(set)
            }
        };
        let mut exclude = BTreeSet::new();
        if let Some(names) = self.value_of("exclude") {
            for name in split_names(names) {
                exclude.insert(canonicalize(name)?);
            }
        }
        Ok(Filter { include, exclude })
    }
}

/// A filter over names, built from include and exclude lists.
///
/// A name passes if it is included (or no include list was given) and it is
/// not excluded. Exclusion wins.
#[derive(Clone, Debug, Default)]
pub struct Filter {
    include: Option<BTreeSet<String>>,
    exclude: BTreeSet<String>,
}

impl Filter {
    pub fn contains(&self, name: &str) -> bool {
        let included = match self.include {
            None => true,
            Some(ref include) => include.contains(name),
        };
        included && !self.exclude.contains(name)
    }
}

/// Resolve the tables to classify and normalize with, preferring those
/// loaded by `ArgMatches::table_dir`.
pub fn resolve_tables(
    loaded: &Option<EmojiTablesOwned>,
) -> EmojiTables<'_> {
    match *loaded {
        Some(ref owned) => owned.as_tables(),
        None => EmojiTables::bundled(),
    }
}

fn split_names(names: &str) -> impl Iterator<Item = &str> {
    names.split(',').map(|name| name.trim()).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{split_names, Filter};

    fn names(xs: &[&str]) -> BTreeSet<String> {
        xs.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn filter_defaults_to_everything() {
        let filter = Filter::default();
        assert!(filter.contains("presentable"));
    }

    #[test]
    fn filter_exclude_overrides_include() {
        let filter = Filter {
            include: Some(names(&["presentable", "text_default"])),
            exclude: names(&["text_default"]),
        };
        assert!(filter.contains("presentable"));
        assert!(!filter.contains("text_default"));
        assert!(!filter.contains("modifier_base"));
    }

    #[test]
    fn names_are_split_on_commas() {
        let got: Vec<&str> =
            split_names(" presentable, ,text_default,").collect();
        assert_eq!(got, vec!["presentable", "text_default"]);
    }
}
