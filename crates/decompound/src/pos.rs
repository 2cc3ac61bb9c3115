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

//! Normalization of OBT/NDT part-of-speech tags and morphological features
//! into flat tagsets usable for lookup and filtering.

/// Closed-class punctuation tags used in the NDT annotation.
const PUNCT_POS: &[&str] = &[
    "clb",
    "<anf>",
    "<komma>",
    "<parentes-beg>",
    "<parentes-slutt>",
    "<strek>",
];

/// Tagset a fullform index normalizes morphological descriptions into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PosFormat {
    /// Uppercased OBT tags with a small set of features folded into the tag.
    Simple,
    /// Universal POS tags (<https://universaldependencies.org/u/pos/>).
    ///
    /// The mapping is not complete since NDT does not annotate everything the
    /// universal tagset distinguishes. AUX would need a wordlist, and NUM is
    /// extracted heuristically from the word form.
    Universal,
}

impl PosFormat {
    /// Normalizes an OBT POS tag and its `|`-separated features to this tagset.
    pub fn normalize(&self, form: &str, pos: &str, feats: &str) -> String {
        match self {
            Self::Simple => simple_tag(form, pos, feats),
            Self::Universal => universal_tag(form, pos, feats),
        }
    }

    /// Tags that productively form compounds in Norwegian. Closed word
    /// classes such as pronouns are excluded.
    pub fn compound_tags(&self) -> &'static [&'static str] {
        match self {
            Self::Simple => &["SUBST", "ADV", "VERB"],
            Self::Universal => &["NOUN", "ADV", "VERB"],
        }
    }
}

fn has_feat(feats: &str, feat: &str) -> bool {
    feats.split('|').any(|f| f == feat)
}

fn simple_tag(form: &str, pos: &str, feats: &str) -> String {
    if form.chars().any(char::is_numeric) {
        return "NUM".to_string();
    }

    if pos == "det" && (has_feat(feats, "<romertall>") || has_feat(feats, "<romartal>")) {
        return "NUM".to_string();
    }

    if PUNCT_POS.contains(&pos) {
        return "PUNKT".to_string();
    }

    if pos == "pron" {
        for feat in ["sp", "pers", "poss", "refl"] {
            if has_feat(feats, feat) {
                return format!("PRON_{}", feat.to_uppercase());
            }
        }
    }

    if pos == "subst" {
        if has_feat(feats, "sym") {
            return "SYMB".to_string();
        }

        // dates and titles are folded in among the proper nouns
        for feat in ["prop", "<tittel>", "fork", "<dato>"] {
            if has_feat(feats, feat) {
                return "SUBST_PROP".to_string();
            }
        }
    }

    if pos == "verb" && has_feat(feats, "pass") {
        return "VERB_PASS".to_string();
    }

    pos.to_uppercase()
}

fn universal_tag(form: &str, pos: &str, feats: &str) -> String {
    if form.chars().any(char::is_numeric) {
        return "NUM".to_string();
    }

    let tag = match pos {
        "adj" => "ADJ",
        "adv" => "ADV",
        "konj" => "CONJ",
        "det" if has_feat(feats, "<romertall>") || has_feat(feats, "<romartal>") => "NUM",
        "det" => "DET",
        "interj" => "INTJ",
        "subst"
            if has_feat(feats, "prop")
                || has_feat(feats, "<tittel>")
                || has_feat(feats, "fork")
                || has_feat(feats, "<dato>") =>
        {
            "PROPN"
        }
        "subst" if has_feat(feats, "symb") => "SYM",
        "subst" => "NOUN",
        "pron" => "PRON",
        "sbu" => "SCONJ",
        "symb" => "SYM",
        "inf-merke" | "verb" => "VERB",
        "prep" => "ADP",
        _ if PUNCT_POS.contains(&pos) => "PUNCT",
        _ => "X",
    };

    tag.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_tags() {
        assert_eq!(PosFormat::Simple.normalize("hus", "subst", "appell|nøyt"), "SUBST");
        assert_eq!(PosFormat::Simple.normalize("Oslo", "subst", "prop"), "SUBST_PROP");
        assert_eq!(PosFormat::Simple.normalize("17.", "subst", "<dato>"), "NUM");
        assert_eq!(PosFormat::Simple.normalize("%", "subst", "sym"), "SYMB");
        assert_eq!(PosFormat::Simple.normalize("min", "pron", "poss|ent"), "PRON_POSS");
        assert_eq!(PosFormat::Simple.normalize("seg", "pron", "refl"), "PRON_REFL");
        assert_eq!(PosFormat::Simple.normalize("kastes", "verb", "pres|pass"), "VERB_PASS");
        assert_eq!(PosFormat::Simple.normalize("kaster", "verb", "pres"), "VERB");
        assert_eq!(PosFormat::Simple.normalize("XIV", "det", "<romertall>"), "NUM");
        assert_eq!(PosFormat::Simple.normalize(",", "<komma>", ""), "PUNKT");
        assert_eq!(PosFormat::Simple.normalize("fort", "adv", ""), "ADV");
    }

    #[test]
    fn universal_tags() {
        assert_eq!(PosFormat::Universal.normalize("hus", "subst", "appell|nøyt"), "NOUN");
        assert_eq!(PosFormat::Universal.normalize("Oslo", "subst", "prop"), "PROPN");
        assert_eq!(PosFormat::Universal.normalize("kaster", "verb", "pres"), "VERB");
        assert_eq!(PosFormat::Universal.normalize("å", "inf-merke", ""), "VERB");
        assert_eq!(PosFormat::Universal.normalize("i", "prep", ""), "ADP");
        assert_eq!(PosFormat::Universal.normalize("at", "sbu", ""), "SCONJ");
        assert_eq!(PosFormat::Universal.normalize("17", "subst", ""), "NUM");
        assert_eq!(PosFormat::Universal.normalize(",", "<komma>", ""), "PUNCT");
        assert_eq!(PosFormat::Universal.normalize("??", "ukjent", ""), "X");
    }

    #[test]
    fn compound_tags_exclude_closed_classes() {
        assert!(!PosFormat::Simple.compound_tags().contains(&"PRON"));
        assert!(!PosFormat::Universal.compound_tags().contains(&"PRON"));
        assert!(PosFormat::Simple.compound_tags().contains(&"SUBST"));
        assert!(PosFormat::Universal.compound_tags().contains(&"NOUN"));
    }
}
