// Decompound is an open source compound word splitter for Norwegian Bokmål.
// Copyright (C) 2024 Decompound contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Fullform index over the Norsk Ordbank lexical database.
//!
//! Norsk Ordbank is not freely redistributable; the datafiles must be
//! obtained from Språkbanken (<https://www.nb.no/sprakbanken/>). The
//! `fullform_bm.txt` file is Latin-1 encoded and tab-separated with the
//! fields `word_id`, `lemma`, `fullform`, `morph_descr`, `paradigm_code` and
//! `paradigm_entry`. Lines starting with `*` are comments.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use fnv::FnvHashMap;
use tracing::info;

use crate::pos::PosFormat;
use crate::{Error, Result};

/// One row of the Ordbank fullform file.
///
/// The morphological description is split into the raw OBT/NDT tag and its
/// features, and additionally normalized into the tagset of the index it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FullformEntry {
    pub word_id: u64,
    pub lemma: String,
    /// Inflected form, lowercased.
    pub fullform: String,
    /// OBT/NDT POS tag, the first token of the morphological description.
    pub raw_pos: String,
    /// Remaining morphological features, `|`-joined.
    pub feats: String,
    /// Normalized POS tag. See [`PosFormat::normalize`].
    pub pos: String,
    pub paradigm_code: String,
    pub paradigm_entry: u32,
}

/// Mapping from lowercase fullforms to the Ordbank entries sharing that form.
///
/// Built once, then only read; cheap to share behind an [`Arc`](std::sync::Arc)
/// between a [`Decompounder`](crate::Decompounder) and lemma lookups.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FullformIndex {
    map: FnvHashMap<String, Vec<FullformEntry>>,
    format: PosFormat,
}

impl FullformIndex {
    /// Reads a fullform datafile from `path`. See [`Self::from_reader`].
    pub fn from_path<P: AsRef<Path>>(path: P, format: PosFormat) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?), format)
    }

    /// Parses the Latin-1 encoded fullform file format described in the
    /// module docs, normalizing POS tags to `format`.
    pub fn from_reader<R: Read>(mut rdr: R, format: PosFormat) -> Result<Self> {
        let mut bytes = Vec::new();
        rdr.read_to_end(&mut bytes)?;

        // published Ordbank files are Latin-1 encoded
        let text = encoding_rs::mem::decode_latin1(&bytes);

        let mut map: FnvHashMap<String, Vec<FullformEntry>> = FnvHashMap::default();
        let mut num_entries = 0usize;

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('*') {
                continue;
            }

            let entry = parse_line(line, format).map_err(|msg| Error::MalformedEntry {
                line: lineno + 1,
                msg,
            })?;

            num_entries += 1;
            map.entry(entry.fullform.clone()).or_default().push(entry);
        }

        info!(
            "parsed {} fullform entries ({} distinct forms)",
            num_entries,
            map.len()
        );

        Ok(Self { map, format })
    }

    /// Builds an index directly from entries, e.g. for tests or lexica from
    /// other sources. Entry POS tags are assumed to already be in `format`.
    pub fn from_entries<I>(entries: I, format: PosFormat) -> Self
    where
        I: IntoIterator<Item = FullformEntry>,
    {
        let mut map: FnvHashMap<String, Vec<FullformEntry>> = FnvHashMap::default();
        for entry in entries {
            map.entry(entry.fullform.clone()).or_default().push(entry);
        }

        Self { map, format }
    }

    /// All entries whose fullform is `form` (must be lowercase).
    pub fn get(&self, form: &str) -> Option<&[FullformEntry]> {
        self.map.get(form).map(Vec::as_slice)
    }

    pub fn contains(&self, form: &str) -> bool {
        self.map.contains_key(form)
    }

    /// Number of distinct fullforms.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn pos_format(&self) -> PosFormat {
        self.format
    }

    /// Looks up the lemma for `word`, using the normalized POS tag for
    /// disambiguation if one is passed.
    ///
    /// When several candidates remain after POS disambiguation, the last one
    /// wins; the remaining ambiguous Ordbank entries tend to list the more
    /// reasonable lemmas last. Unknown words are returned unchanged (apart
    /// from lowercasing).
    pub fn lemmatize(&self, word: &str, pos: Option<&str>) -> String {
        // all matching is done on lowercase
        let word = word.to_lowercase();

        let candidate = self.get(&word).and_then(|entries| {
            entries
                .iter()
                .filter(|e| pos.map_or(true, |p| e.pos == p))
                .next_back()
        });

        match candidate {
            Some(entry) => entry.lemma.clone(),
            None => word,
        }
    }
}

fn parse_line(line: &str, format: PosFormat) -> std::result::Result<FullformEntry, String> {
    let mut fields = line.split('\t');
    let mut next = |name: &str| {
        fields
            .next()
            .map(str::to_string)
            .ok_or_else(|| format!("missing field '{name}'"))
    };

    let word_id = next("word_id")?;
    let lemma = next("lemma")?;
    let fullform = next("fullform")?.to_lowercase();
    let morph_descr = next("morph_descr")?;
    let paradigm_code = next("paradigm_code")?;
    let paradigm_entry = next("paradigm_entry")?;

    let word_id = word_id
        .parse::<u64>()
        .map_err(|e| format!("word_id: {e}"))?;
    let paradigm_entry = paradigm_entry
        .parse::<u32>()
        .map_err(|e| format!("paradigm_entry: {e}"))?;

    let mut morph_parts = morph_descr.split_whitespace();
    let raw_pos = morph_parts
        .next()
        .ok_or("empty morphological description")?
        .to_string();
    let feats = morph_parts.collect::<Vec<_>>().join("|");

    let pos = format.normalize(&fullform, &raw_pos, &feats);

    Ok(FullformEntry {
        word_id,
        lemma,
        fullform,
        raw_pos,
        feats,
        pos,
        paradigm_code,
        paradigm_entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Latin-1 is the first 256 code points, so a cast is enough here.
    fn latin1(s: &str) -> Vec<u8> {
        s.chars().map(|c| c as u8).collect()
    }

    const FIXTURE: &str = "\
* fullform_bm.txt test fixture

1\tblåbær\tBlåbærene\tsubst appell nøyt be fl\t700\t3
2\tkaste\tkastes\tverb pres pass\t701\t8
3\tgammel\tgamle\tadj be ent pos\t702\t2
4\tgammel\tgamle\tadj fl pos\t702\t4
";

    #[test]
    fn parse_fullform_file() {
        let index = FullformIndex::from_reader(&latin1(FIXTURE)[..], PosFormat::Simple).unwrap();

        assert_eq!(index.len(), 3);
        assert!(index.contains("blåbærene"));
        assert!(!index.contains("Blåbærene"));

        let entries = index.get("blåbærene").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word_id, 1);
        assert_eq!(entries[0].lemma, "blåbær");
        assert_eq!(entries[0].fullform, "blåbærene");
        assert_eq!(entries[0].raw_pos, "subst");
        assert_eq!(entries[0].feats, "appell|nøyt|be|fl");
        assert_eq!(entries[0].pos, "SUBST");
        assert_eq!(entries[0].paradigm_code, "700");
        assert_eq!(entries[0].paradigm_entry, 3);

        assert_eq!(index.get("kastes").unwrap()[0].pos, "VERB_PASS");
        assert_eq!(index.get("gamle").unwrap().len(), 2);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let index =
            FullformIndex::from_reader(&latin1("* only a comment\n\n")[..], PosFormat::Simple)
                .unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn malformed_lines_are_rejected() {
        let err = FullformIndex::from_reader("1\tfoo".as_bytes(), PosFormat::Simple).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedEntry { line: 1, .. }));

        let err = FullformIndex::from_reader(
            "x\tfoo\tfoo\tsubst\t700\t1".as_bytes(),
            PosFormat::Simple,
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::MalformedEntry { line: 1, .. }));

        let err = FullformIndex::from_reader(
            "1\tfoo\tfoo\t \t700\t1".as_bytes(),
            PosFormat::Simple,
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::MalformedEntry { line: 1, .. }));
    }

    #[test]
    fn lemmatize_with_pos_disambiguation() {
        let index = FullformIndex::from_reader(&latin1(FIXTURE)[..], PosFormat::Simple).unwrap();

        assert_eq!(index.lemmatize("Blåbærene", None), "blåbær");
        assert_eq!(index.lemmatize("kastes", Some("VERB_PASS")), "kaste");
        // mismatching POS falls back to the word itself
        assert_eq!(index.lemmatize("kastes", Some("SUBST")), "kastes");
        assert_eq!(index.lemmatize("ukjentord", None), "ukjentord");
        // the last remaining candidate wins
        assert_eq!(index.lemmatize("gamle", Some("ADJ")), "gammel");
    }
}
