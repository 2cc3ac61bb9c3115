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

//! Lexicon-driven decompounding for Norwegian Bokmål.
//!
//! Norwegian forms compounds by concatenating words without separators
//! ("vinflaske" = "vin" + "flaske"). This crate splits such compounds against
//! a fullform index built from the Norsk Ordbank lexical database, and also
//! exposes the index itself for lemma lookups.
//!
//! ```
//! # fn main() -> Result<(), decompound::Error> {
//! use std::sync::Arc;
//!
//! use decompound::{Decompounder, FullformIndex, PosFormat};
//!
//! let fullforms = "1\tvin\tvin\tsubst appell mask ub ent\t700\t1\n\
//!                  2\tflaske\tflaske\tsubst appell mask ub ent\t701\t1";
//! let index = FullformIndex::from_reader(fullforms.as_bytes(), PosFormat::Simple)?;
//!
//! let decompounder = Decompounder::new(Arc::new(index));
//! assert_eq!(
//!     decompounder.decompound("vinflaske"),
//!     Some(vec!["vin".to_string(), "flaske".to_string()])
//! );
//! # Ok(())
//! # }
//! ```

pub mod decompounder;
pub mod lexicon;
pub mod pos;

pub use decompounder::{Decompounder, DecompounderConfig, PosField, PosFilter};
pub use lexicon::{FullformEntry, FullformIndex};
pub use pos::PosFormat;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed fullform entry on line {line}: {msg}")]
    MalformedEntry { line: usize, msg: String },
}
