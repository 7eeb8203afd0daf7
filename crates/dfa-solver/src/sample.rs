//! Ciphertext pairs, sample sets and their on-disk formats.
//!
//! Two formats are supported: plain text with one 32-hex-digit block per
//! line (what the acquisition scripts dump as `ccpts.txt` / `fcpts.txt`),
//! and `bincode`-serialized [`SampleSet`] corpora.

use aes_core::Block;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ciphertexts of one plaintext, computed without and with the fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CiphertextPair {
    /// Output of the unfaulted encryption.
    pub correct: Block,
    /// Output of the faulted encryption.
    pub faulty: Block,
}

impl CiphertextPair {
    /// Creates a pair.
    pub fn new(correct: Block, faulty: Block) -> Self {
        Self { correct, faulty }
    }
}

/// Errors raised while building or loading a [`SampleSet`].
#[derive(Debug, Error)]
pub enum SampleSetError {
    /// No pairs were supplied.
    #[error("sample set is empty")]
    Empty,
    /// The correct and faulty ciphertext lists differ in length.
    #[error("{correct} correct ciphertexts but {faulty} faulty ciphertexts")]
    LengthMismatch {
        /// Number of correct ciphertexts.
        correct: usize,
        /// Number of faulty ciphertexts.
        faulty: usize,
    },
    /// A line of a hex dump is not valid hex.
    #[error("line {line}: invalid hex: {source}")]
    InvalidHex {
        /// One-based line number.
        line: usize,
        /// Decoder error.
        #[source]
        source: hex::FromHexError,
    },
    /// A line of a hex dump does not hold exactly one block.
    #[error("line {line}: expected 16 bytes, found {len}")]
    InvalidBlockLength {
        /// One-based line number.
        line: usize,
        /// Number of decoded bytes.
        len: usize,
    },
    /// A serialized corpus could not be encoded or decoded.
    #[error("corpus codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Non-empty, ordered set of ciphertext pairs sharing one key and one fault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<CiphertextPair>", try_from = "Vec<CiphertextPair>")]
pub struct SampleSet {
    pairs: Vec<CiphertextPair>,
}

impl SampleSet {
    /// Wraps pairs, rejecting an empty list.
    pub fn new(pairs: Vec<CiphertextPair>) -> Result<Self, SampleSetError> {
        if pairs.is_empty() {
            return Err(SampleSetError::Empty);
        }
        Ok(Self { pairs })
    }

    /// Zips parallel lists of correct and faulty ciphertexts.
    pub fn from_ciphertexts(correct: &[Block], faulty: &[Block]) -> Result<Self, SampleSetError> {
        if correct.len() != faulty.len() {
            return Err(SampleSetError::LengthMismatch {
                correct: correct.len(),
                faulty: faulty.len(),
            });
        }
        let pairs = correct
            .iter()
            .zip(faulty)
            .map(|(c, f)| CiphertextPair::new(*c, *f))
            .collect();
        Self::new(pairs)
    }

    /// Parses two hex dumps, one block per line, into a sample set.
    pub fn from_hex(correct: &str, faulty: &str) -> Result<Self, SampleSetError> {
        let correct = parse_hex_blocks(correct)?;
        let faulty = parse_hex_blocks(faulty)?;
        Self::from_ciphertexts(&correct, &faulty)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs, in order.
    pub fn pairs(&self) -> &[CiphertextPair] {
        &self.pairs
    }

    /// Iterates over the pairs.
    pub fn iter(&self) -> core::slice::Iter<'_, CiphertextPair> {
        self.pairs.iter()
    }

    /// Hex dump of the correct ciphertexts.
    pub fn correct_hex(&self) -> String {
        format_hex_blocks(self.pairs.iter().map(|p| &p.correct))
    }

    /// Hex dump of the faulty ciphertexts.
    pub fn faulty_hex(&self) -> String {
        format_hex_blocks(self.pairs.iter().map(|p| &p.faulty))
    }

    /// Serializes the set with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SampleSetError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserializes a set with `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SampleSetError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a CiphertextPair;
    type IntoIter = core::slice::Iter<'a, CiphertextPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl From<SampleSet> for Vec<CiphertextPair> {
    fn from(set: SampleSet) -> Self {
        set.pairs
    }
}

impl TryFrom<Vec<CiphertextPair>> for SampleSet {
    type Error = SampleSetError;

    fn try_from(pairs: Vec<CiphertextPair>) -> Result<Self, Self::Error> {
        Self::new(pairs)
    }
}

/// Parses one block per non-blank line. Whitespace inside a line is ignored,
/// so both `0011..ff` and `00 11 .. ff` are accepted.
pub fn parse_hex_blocks(text: &str) -> Result<Vec<Block>, SampleSetError> {
    let mut blocks = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let digits: String = raw.split_whitespace().collect();
        if digits.is_empty() {
            continue;
        }
        let bytes =
            hex::decode(&digits).map_err(|source| SampleSetError::InvalidHex { line, source })?;
        let block: Block = bytes
            .as_slice()
            .try_into()
            .map_err(|_| SampleSetError::InvalidBlockLength {
                line,
                len: bytes.len(),
            })?;
        blocks.push(block);
    }
    Ok(blocks)
}

/// Formats blocks as lowercase hex, one per line, each line newline-terminated.
pub fn format_hex_blocks<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&hex::encode(block));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "3544e02ca33411cf4d5df8fcc6e7a5ec\n\nd42c1b10 3455e3d5 c712425c 37b95a0d\n";

    #[test]
    fn parses_dump_skipping_blank_lines() {
        let blocks = parse_hex_blocks(DUMP).expect("parse");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0][0], 0x35);
        assert_eq!(blocks[1][15], 0x0d);
    }

    #[test]
    fn reports_line_of_bad_hex() {
        let err = parse_hex_blocks("00112233445566778899aabbccddeeff\nzz\n").unwrap_err();
        assert!(matches!(err, SampleSetError::InvalidHex { line: 2, .. }));
    }

    #[test]
    fn reports_short_block() {
        let err = parse_hex_blocks("0011").unwrap_err();
        assert!(matches!(
            err,
            SampleSetError::InvalidBlockLength { line: 1, len: 2 }
        ));
    }

    #[test]
    fn rejects_empty_and_mismatched_sets() {
        assert!(matches!(SampleSet::new(Vec::new()), Err(SampleSetError::Empty)));
        let err = SampleSet::from_ciphertexts(&[[0u8; 16]; 3], &[[1u8; 16]; 2]).unwrap_err();
        assert!(matches!(
            err,
            SampleSetError::LengthMismatch {
                correct: 3,
                faulty: 2
            }
        ));
    }

    #[test]
    fn hex_dump_reparses() {
        let correct = [[0xabu8; 16], [0x01u8; 16]];
        let faulty = [[0xcdu8; 16], [0x02u8; 16]];
        let set = SampleSet::from_ciphertexts(&correct, &faulty).expect("set");
        let again = SampleSet::from_hex(&set.correct_hex(), &set.faulty_hex()).expect("reparse");
        assert_eq!(set, again);
        assert!(set.correct_hex().starts_with("abababab"));
    }

    #[test]
    fn bincode_corpus_roundtrip() {
        let set = SampleSet::new(vec![CiphertextPair::new([3u8; 16], [4u8; 16])]).expect("set");
        let bytes = set.to_bytes().expect("serialize");
        assert_eq!(SampleSet::from_bytes(&bytes).expect("deserialize"), set);
    }

    #[test]
    fn empty_corpus_is_rejected_on_load() {
        let bytes = bincode::serialize(&Vec::<CiphertextPair>::new()).expect("serialize");
        assert!(SampleSet::from_bytes(&bytes).is_err());
    }
}
