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

//! Splits compound words against a fullform index.
//!
//! The decompounder scans for fullform matches from the beginning of the
//! word and builds a tree of match combinations for each initial match. The
//! trees are then flattened into candidate segmentations, candidates that do
//! not cover the whole word are dropped, and the simplest surviving
//! candidate (fewest segments) wins.
//!
//! Matches can be filtered on length (very short matches are usually not
//! proper words) and on POS tag (compounds are not productively formed from
//! closed word classes in Norwegian).
//!
//! Not optimized; runtime is bounded by the branching factor of the lexicon,
//! which is small for natural-language words.

use std::sync::Arc;

use itertools::Itertools;

use crate::lexicon::{FullformEntry, FullformIndex};
use crate::pos::PosFormat;
use crate::{Error, Result};

/// Entry field a [`PosFilter`] reads the tag from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PosField {
    /// The normalized tag ([`FullformEntry::pos`]).
    Normalized,
    /// The raw OBT/NDT tag ([`FullformEntry::raw_pos`]).
    Raw,
}

impl PosField {
    fn tag<'a>(&self, entry: &'a FullformEntry) -> &'a str {
        match self {
            Self::Normalized => &entry.pos,
            Self::Raw => &entry.raw_pos,
        }
    }
}

/// Restricts matches to entries whose tag is in an allow-list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PosFilter {
    pub field: PosField,
    pub tags: Vec<String>,
}

impl PosFilter {
    /// Filter on the compound-forming tags of `format`. See
    /// [`PosFormat::compound_tags`].
    pub fn compound_tags(format: PosFormat) -> Self {
        Self {
            field: PosField::Normalized,
            tags: format
                .compound_tags()
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    fn matches(&self, entry: &FullformEntry) -> bool {
        self.tags.iter().any(|t| t == self.field.tag(entry))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecompounderConfig {
    /// Segments must be strictly longer than this many characters.
    pub min_match: usize,
    /// Optional POS restriction on matched segments. `None` accepts any
    /// entry for the segment regardless of tag.
    pub pos_filter: Option<PosFilter>,
}

impl Default for DecompounderConfig {
    fn default() -> Self {
        Self {
            min_match: 2,
            pos_filter: None,
        }
    }
}

/// One way to continue matching after consuming a substring.
///
/// A `Leaf` is a match with no further matches behind it; it only yields a
/// complete segmentation if it ends exactly at the end of the word. A
/// `Branch` holds the matched substring and all continuations found after it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MatchNode {
    Leaf(String),
    Branch(String, Vec<MatchNode>),
}

/// Splits Norwegian Bokmål compounds against a fullform index.
///
/// `decompound` is a pure function of the word, the index and the
/// configuration; the index is only read, so one decompounder (or several
/// sharing an index) can be used freely across threads.
#[derive(Debug, Clone)]
pub struct Decompounder {
    index: Arc<FullformIndex>,
    config: DecompounderConfig,
}

impl Decompounder {
    /// Decompounder with the default configuration: minimum match length 2,
    /// no POS filtering.
    pub fn new(index: Arc<FullformIndex>) -> Self {
        Self {
            index,
            config: DecompounderConfig::default(),
        }
    }

    /// Errors on invalid configuration: `min_match` of zero would let every
    /// single character match, and an empty POS allow-list would reject
    /// every segment.
    pub fn with_config(index: Arc<FullformIndex>, config: DecompounderConfig) -> Result<Self> {
        if config.min_match == 0 {
            return Err(Error::InvalidConfig(
                "min_match must be at least 1".to_string(),
            ));
        }

        if let Some(filter) = &config.pos_filter {
            if filter.tags.is_empty() {
                return Err(Error::InvalidConfig(
                    "POS filter allow-list is empty".to_string(),
                ));
            }
        }

        Ok(Self { index, config })
    }

    /// Splits `word` into the words it is compounded from, or `None` if no
    /// complete segmentation exists.
    ///
    /// Matching is case-insensitive; the returned segments are lowercase.
    /// Note that an unknown non-compound word also yields `None`, and that a
    /// known word yields the whole word as a single segment, so `None` must
    /// not be read as "not a compound".
    ///
    /// If several segmentations exist the one with the fewest segments is
    /// returned. Remaining ties go to the first segmentation found by the
    /// left-to-right scan, which with this matching strategy usually has the
    /// longest last segment.
    pub fn decompound(&self, word: &str) -> Option<Vec<String>> {
        if word.is_empty() {
            return None;
        }

        let word = word.to_lowercase();
        let forest = self.match_forest(&word, 0);

        let word_len = word.chars().count();
        let mut candidates: Vec<Vec<String>> = forest
            .iter()
            .flat_map(flatten)
            .filter(|c| c.iter().map(|p| p.chars().count()).sum::<usize>() == word_len)
            .collect();

        let best = candidates.iter().position_min_by_key(|c| c.len())?;
        Some(candidates.swap_remove(best))
    }

    /// All match trees rooted at byte position `start` of `word`.
    ///
    /// For every prefix of `word[start..]` that matches the index, the
    /// matches continuing after it are collected recursively. `start` must
    /// lie on a character boundary.
    fn match_forest(&self, word: &str, start: usize) -> Vec<MatchNode> {
        let mut nodes = Vec::new();
        let mut num_chars = 0;

        for (offset, ch) in word[start..].char_indices() {
            num_chars += 1;
            let end = start + offset + ch.len_utf8();
            let part = &word[start..end];

            if num_chars > self.config.min_match && self.is_match(part) {
                let continuations = self.match_forest(word, end);
                if continuations.is_empty() {
                    nodes.push(MatchNode::Leaf(part.to_string()));
                } else {
                    nodes.push(MatchNode::Branch(part.to_string(), continuations));
                }
            }
        }

        nodes
    }

    fn is_match(&self, part: &str) -> bool {
        match &self.config.pos_filter {
            Some(filter) => self
                .index
                .get(part)
                .is_some_and(|entries| entries.iter().any(|e| filter.matches(e))),
            None => self.index.contains(part),
        }
    }
}

/// Depth-first expansion of one match tree into candidate segmentations.
fn flatten(node: &MatchNode) -> Vec<Vec<String>> {
    match node {
        MatchNode::Leaf(part) => vec![vec![part.clone()]],
        MatchNode::Branch(head, continuations) => continuations
            .iter()
            .flat_map(flatten)
            .map(|tail| {
                let mut candidate = Vec::with_capacity(tail.len() + 1);
                candidate.push(head.clone());
                candidate.extend(tail);
                candidate
            })
            .collect(),
    }
}
