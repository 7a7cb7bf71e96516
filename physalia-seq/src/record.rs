//! The shared read entity: residues, optional quality, type tag, name.
//!
//! [`SeqRecord`] is an immutable value type; every operation that changes
//! content produces a new record. Residue bytes are stored exactly as given —
//! assembly output is case-significant, so there is no uppercasing or
//! alphabet validation here. Residues outside the IUPAC alphabet are legal
//! content that simply never matches during comparison.

use std::fmt;

use physalia_core::{PhysaliaError, Result, Sequence, Summarizable};

use crate::quality::PhredEncoding;

/// The molecule type of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeqKind {
    Dna,
    Rna,
    Protein,
}

impl SeqKind {
    /// Human-readable name (e.g. "DNA").
    pub fn name(self) -> &'static str {
        match self {
            SeqKind::Dna => "DNA",
            SeqKind::Rna => "RNA",
            SeqKind::Protein => "Protein",
        }
    }
}

/// A sequence read: residues, optional encoded quality bytes, and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeqRecord {
    name: Option<String>,
    kind: SeqKind,
    seq: Vec<u8>,
    qual: Option<Vec<u8>>,
}

impl SeqRecord {
    /// Create a new record.
    ///
    /// Returns an error if quality is present and its length does not match
    /// the sequence length.
    pub fn new(
        name: Option<String>,
        kind: SeqKind,
        seq: Vec<u8>,
        qual: Option<Vec<u8>>,
    ) -> Result<Self> {
        if let Some(ref q) = qual {
            if q.len() != seq.len() {
                return Err(PhysaliaError::InvalidInput(format!(
                    "sequence length ({}) does not match quality length ({})",
                    seq.len(),
                    q.len()
                )));
            }
        }
        Ok(Self {
            name,
            kind,
            seq,
            qual,
        })
    }

    /// Create a record with no quality scores.
    pub fn without_quality(name: Option<String>, kind: SeqKind, seq: Vec<u8>) -> Self {
        Self {
            name,
            kind,
            seq,
            qual: None,
        }
    }

    /// The record name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The molecule type.
    pub fn kind(&self) -> SeqKind {
        self.kind
    }

    /// The residue bytes.
    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    /// The encoded quality bytes, if present.
    pub fn qual(&self) -> Option<&[u8]> {
        self.qual.as_deref()
    }

    /// Whether the record carries quality scores.
    pub fn has_quality(&self) -> bool {
        self.qual.is_some()
    }

    /// Extract the half-open sub-record `[start, end)`.
    ///
    /// Slices residues and quality together; name and type are kept.
    pub fn slice(&self, start: usize, end: usize) -> Result<SeqRecord> {
        if start > end || end > self.seq.len() {
            return Err(PhysaliaError::InvalidInput(format!(
                "slice [{}, {}) out of range for length {}",
                start,
                end,
                self.seq.len()
            )));
        }
        Ok(SeqRecord {
            name: self.name.clone(),
            kind: self.kind,
            seq: self.seq[start..end].to_vec(),
            qual: self.qual.as_ref().map(|q| q[start..end].to_vec()),
        })
    }

    /// Mean decoded quality score, or `None` for a record without quality.
    ///
    /// Returns 0.0 when quality is present but empty.
    pub fn mean_quality(&self, encoding: PhredEncoding) -> Option<f64> {
        let qual = self.qual.as_deref()?;
        if qual.is_empty() {
            return Some(0.0);
        }
        let offset = encoding.offset();
        let sum: u64 = qual.iter().map(|&b| b.saturating_sub(offset) as u64).sum();
        Some(sum as f64 / qual.len() as f64)
    }

    /// Return the reverse complement, preserving case. Quality scores are
    /// reversed alongside the residues.
    ///
    /// # Errors
    ///
    /// Returns an error for protein records.
    pub fn reverse_complement(&self) -> Result<SeqRecord> {
        let complement = match self.kind {
            SeqKind::Dna => dna_complement,
            SeqKind::Rna => rna_complement,
            SeqKind::Protein => {
                return Err(PhysaliaError::InvalidInput(
                    "cannot reverse-complement a protein record".into(),
                ))
            }
        };
        let seq: Vec<u8> = self.seq.iter().rev().map(|&b| cased(b, complement)).collect();
        let qual = self
            .qual
            .as_ref()
            .map(|q| q.iter().rev().copied().collect());
        Ok(SeqRecord {
            name: self.name.clone(),
            kind: self.kind,
            seq,
            qual,
        })
    }
}

/// Apply an uppercase complement table to a byte, preserving its case.
fn cased(b: u8, complement: fn(u8) -> u8) -> u8 {
    if b.is_ascii_lowercase() {
        complement(b.to_ascii_uppercase()).to_ascii_lowercase()
    } else {
        complement(b)
    }
}

fn dna_complement(b: u8) -> u8 {
    match b {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y', // A|G → T|C
        b'Y' => b'R',
        b'S' => b'S', // G|C → C|G
        b'W' => b'W', // A|T → T|A
        b'K' => b'M', // G|T → C|A
        b'M' => b'K',
        b'B' => b'V', // C|G|T → G|C|A
        b'V' => b'B',
        b'D' => b'H', // A|G|T → T|C|A
        b'H' => b'D',
        b'N' => b'N',
        other => other,
    }
}

fn rna_complement(b: u8) -> u8 {
    match b {
        b'A' => b'U',
        b'U' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'S' => b'S',
        b'W' => b'W',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'N' => b'N',
        other => other,
    }
}

impl Sequence for SeqRecord {
    fn as_bytes(&self) -> &[u8] {
        &self.seq
    }
}

impl Summarizable for SeqRecord {
    fn summary(&self) -> String {
        let name = self.name.as_deref().unwrap_or("<unnamed>");
        match self.mean_quality(PhredEncoding::Phred33) {
            Some(q) => format!(
                "{} {} ({} bp, mean Q{:.1})",
                self.kind.name(),
                name,
                self.seq.len(),
                q
            ),
            None => format!("{} {} ({} bp)", self.kind.name(), name, self.seq.len()),
        }
    }
}

impl fmt::Display for SeqRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = std::str::from_utf8(&self.seq).unwrap_or("???");
        f.write_str(s)
    }
}
