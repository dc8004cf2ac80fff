use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use emoji_parse::{EmojiProperty, EmojiVariationSequence};
use emoji_presentation::Table;
use log::{debug, info};

use crate::args::ArgMatches;
use crate::error::Result;

/// U+1F46A FAMILY. It is listed as a modifier base, but in practice skin
/// tones are applied to the individual people of a family ZWJ sequence.
const FAMILY: u32 = 0x1F46A;

pub fn command(args: ArgMatches<'_>) -> Result<()> {
    if args.is_present("list-tables") {
        for table in Table::ALL.iter() {
            println!("{}", table);
        }
        return Ok(());
    }

    let dir = args.ucd_dir()?;
    let filter = args.filter(|name| match Table::from_name(name) {
        Some(table) => Ok(table.name().to_string()),
        None => err!("unrecognized emoji table: {}", name),
    })?;
    let sets = EmojiSets::from_ucd_dir(dir)?;

    let mut wtr = args.writer("emoji")?;
    let selected: BTreeMap<&str, &BTreeSet<u32>> = Table::ALL
        .iter()
        .map(|&table| (table.name(), sets.get(table)))
        .filter(|&(name, _)| filter.contains(name))
        .collect();
    wtr.names(selected.keys())?;
    for (name, set) in selected {
        wtr.ranges(name, set)?;
    }
    Ok(())
}

/// The codepoint sets behind each emoji table, derived from the emoji data
/// files of a UCD.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EmojiSets {
    presentable: BTreeSet<u32>,
    text_default: BTreeSet<u32>,
    modifier_base: BTreeSet<u32>,
    variation_eligible: BTreeSet<u32>,
}

impl EmojiSets {
    pub fn from_ucd_dir<P: AsRef<Path>>(ucd_dir: P) -> Result<EmojiSets> {
        let ucd_dir = ucd_dir.as_ref();
        let props: Vec<EmojiProperty> = emoji_parse::parse(ucd_dir)?;
        let seqs: Vec<EmojiVariationSequence> = emoji_parse::parse(ucd_dir)?;
        debug!(
            "read {} emoji property rows and {} variation sequences from {}",
            props.len(),
            seqs.len(),
            ucd_dir.display(),
        );
        Ok(EmojiSets::from_rows(&props, &seqs))
    }

    /// Derive the sets from parsed rows:
    ///
    /// * `presentable` is `Emoji_Presentation` minus `Emoji_Component`.
    /// * `text_default` is `Emoji` minus `Emoji_Presentation`.
    /// * `modifier_base` is `Emoji_Modifier_Base` minus U+1F46A FAMILY.
    /// * `variation_eligible` is every base of a variation sequence.
    pub fn from_rows(
        props: &[EmojiProperty],
        seqs: &[EmojiVariationSequence],
    ) -> EmojiSets {
        let mut by_property: BTreeMap<&str, BTreeSet<u32>> = BTreeMap::new();
        for row in props {
            by_property
                .entry(row.property.as_str())
                .or_insert_with(BTreeSet::new)
                .extend(row.codepoints.into_iter().map(|cp| cp.value()));
        }
        let empty = BTreeSet::new();
        let prop = |name: &str| by_property.get(name).unwrap_or(&empty);

        let presentable = prop("Emoji_Presentation")
            .difference(prop("Emoji_Component"))
            .cloned()
            .collect();
        let text_default = prop("Emoji")
            .difference(prop("Emoji_Presentation"))
            .cloned()
            .collect();
        let mut modifier_base = prop("Emoji_Modifier_Base").clone();
        modifier_base.remove(&FAMILY);
        let variation_eligible =
            seqs.iter().map(|seq| seq.codepoint.value()).collect();

        let sets = EmojiSets {
            presentable,
            text_default,
            modifier_base,
            variation_eligible,
        };
        for &table in Table::ALL.iter() {
            info!("{}: {} codepoints", table, sets.get(table).len());
        }
        sets
    }

    pub fn get(&self, table: Table) -> &BTreeSet<u32> {
        match table {
            Table::Presentable => &self.presentable,
            Table::TextDefault => &self.text_default,
            Table::ModifierBase => &self.modifier_base,
            Table::VariationEligible => &self.variation_eligible,
        }
    }
}

#[cfg(test)]
mod tests {
    use emoji_parse::{EmojiProperty, EmojiVariationSequence};
    use emoji_presentation::{EmojiTables, Table};

    use super::EmojiSets;

    const EMOJI_DATA: &str = "\
# emoji-data.txt
0023          ; Emoji                # 0.0  [1] (#) hash sign
0030..0039    ; Emoji                # 0.0 [10] (0..9) digit zero..digit nine
2600          ; Emoji                # 0.6  [1] sun
231A..231B    ; Emoji                # 0.6  [2] watch..hourglass done
1F1E6..1F1FF  ; Emoji                # 0.0 [26] regional indicators
1F46A         ; Emoji                # 0.6  [1] family
1F44D         ; Emoji                # 0.6  [1] thumbs up
231A..231B    ; Emoji_Presentation   # 0.6  [2] watch..hourglass done
1F1E6..1F1FF  ; Emoji_Presentation   # 0.0 [26] regional indicators
1F46A         ; Emoji_Presentation   # 0.6  [1] family
1F44D         ; Emoji_Presentation   # 0.6  [1] thumbs up
1F44D         ; Emoji_Modifier_Base  # 0.6  [1] thumbs up
1F46A         ; Emoji_Modifier_Base  # 0.6  [1] family
0023          ; Emoji_Component      # 0.0  [1] (#) hash sign
0030..0039    ; Emoji_Component      # 0.0 [10] (0..9) digit zero..digit nine
1F1E6..1F1FF  ; Emoji_Component      # 0.0 [26] regional indicators
";

    const VARIATION_SEQUENCES: &str = "\
0023 FE0E  ; text style;  # (1.1) NUMBER SIGN
0023 FE0F  ; emoji style; # (1.1) NUMBER SIGN
2600 FE0E  ; text style;  # (1.1) BLACK SUN WITH RAYS
2600 FE0F  ; emoji style; # (1.1) BLACK SUN WITH RAYS
231A FE0E  ; text style;  # (1.1) WATCH
231A FE0F  ; emoji style; # (1.1) WATCH
";

    fn rows<T: std::str::FromStr>(data: &str) -> Vec<T>
    where
        T::Err: std::fmt::Debug,
    {
        data.lines()
            .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
            .map(|line| line.parse().unwrap())
            .collect()
    }

    fn sets() -> EmojiSets {
        let props: Vec<EmojiProperty> = rows(EMOJI_DATA);
        let seqs: Vec<EmojiVariationSequence> = rows(VARIATION_SEQUENCES);
        EmojiSets::from_rows(&props, &seqs)
    }

    fn list(table: Table) -> Vec<u32> {
        sets().get(table).iter().cloned().collect()
    }

    #[test]
    fn presentable_excludes_components() {
        assert_eq!(
            list(Table::Presentable),
            vec![0x231A, 0x231B, 0x1F44D, 0x1F46A]
        );
    }

    #[test]
    fn text_default_excludes_presentation() {
        let mut expected = vec![0x23];
        expected.extend(0x30..=0x39);
        expected.push(0x2600);
        assert_eq!(list(Table::TextDefault), expected);
    }

    #[test]
    fn modifier_base_excludes_family() {
        assert_eq!(list(Table::ModifierBase), vec![0x1F44D]);
    }

    #[test]
    fn variation_eligible_collects_bases() {
        assert_eq!(list(Table::VariationEligible), vec![0x23, 0x231A, 0x2600]);
    }

    #[test]
    fn bundled_tables_agree_on_sample() {
        let bundled = EmojiTables::bundled();
        let sets = sets();
        for &table in Table::ALL.iter() {
            for &cp in sets.get(table) {
                assert!(
                    bundled.get(table).contains(cp),
                    "{} missing U+{:04X}",
                    table,
                    cp
                );
            }
        }
    }
}
