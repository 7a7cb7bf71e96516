//! Greedy overlap assembly of read pairs.
//!
//! [`assemble`] searches for an overlap in which `read1`'s tail aligns
//! against `read2`'s head within a mismatch budget, trying the largest
//! candidate first. When the reads differ in length, the search first walks
//! off the length difference (sliding the window without shrinking it) and
//! only then starts shortening the overlap, so unequal reads are still
//! tested at full candidate length before the search space narrows.
//!
//! On success the reads become one record: flanking bases lower-cased, the
//! overlap upper-cased, and — when both reads carry quality scores — each
//! overlap position consensus-called by [`consensus_merge`].

use physalia_core::{PhysaliaError, Result, Sequence};

use crate::ambig::count_mismatches;
use crate::record::SeqRecord;

/// Tuning knobs for the overlap search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeConfig {
    /// Percentage of the overlap length allowed to mismatch (0–100).
    pub mismatch_pct: usize,
    /// Smallest overlap worth reporting (≥ 1).
    pub overlap_min: usize,
    /// Largest overlap to try. Defaults to the shorter read length and is
    /// always clamped to both read lengths.
    pub overlap_max: Option<usize>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            mismatch_pct: 0,
            overlap_min: 1,
            overlap_max: None,
        }
    }
}

impl MergeConfig {
    fn validate(&self) -> Result<()> {
        if self.mismatch_pct > 100 {
            return Err(PhysaliaError::InvalidInput(format!(
                "mismatch_pct must be in 0–100, got {}",
                self.mismatch_pct
            )));
        }
        if self.overlap_min == 0 {
            return Err(PhysaliaError::InvalidInput(
                "overlap_min must be at least 1".into(),
            ));
        }
        if self.overlap_max == Some(0) {
            return Err(PhysaliaError::InvalidInput(
                "overlap_max must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of an assembly attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyResult {
    /// The reads merged at the reported overlap.
    Merged {
        record: SeqRecord,
        /// Overlap length at which the reads were joined.
        overlap: usize,
        /// Mismatches counted before the matcher accepted.
        mismatches: usize,
    },
    /// No candidate overlap satisfied the mismatch budget. An expected
    /// outcome, not an error.
    NoOverlap,
}

impl AssemblyResult {
    /// Whether the assembly produced a merged record.
    pub fn is_merged(&self) -> bool {
        matches!(self, AssemblyResult::Merged { .. })
    }

    /// The merged record, if any.
    pub fn into_record(self) -> Option<SeqRecord> {
        match self {
            AssemblyResult::Merged { record, .. } => Some(record),
            AssemblyResult::NoOverlap => None,
        }
    }
}

/// Assemble two reads by their best overlap.
///
/// Tries candidate overlaps longest-first: the window anchors `read1`'s
/// tail against `read2`'s head, and every failed attempt slides the anchor
/// right by one, consuming the read-length difference before giving up any
/// overlap length. The first candidate within the mismatch budget wins.
///
/// The merged record takes `read1`'s type, carries quality exactly when
/// both inputs do, and is renamed `<name>:overlap=<N>:hamming=<M>` when
/// `read1` has a name.
///
/// # Errors
///
/// Returns an error for an invalid [`MergeConfig`]. Exhausting all
/// candidates is reported as [`AssemblyResult::NoOverlap`], not an error.
pub fn assemble(
    read1: &SeqRecord,
    read2: &SeqRecord,
    config: &MergeConfig,
) -> Result<AssemblyResult> {
    config.validate()?;

    let len1 = read1.len();
    let len2 = read2.len();

    let mut overlap = config
        .overlap_max
        .unwrap_or_else(|| len1.min(len2))
        .min(len1)
        .min(len2);
    let mut length_diff = len1.saturating_sub(len2);
    let mut offset1 = len1 - overlap - length_diff;

    while overlap >= config.overlap_min {
        let max_mismatch = (overlap * config.mismatch_pct + 50) / 100;
        if let Some(mismatches) =
            count_mismatches(read1.seq(), read2.seq(), offset1, 0, overlap, max_mismatch)
        {
            let record = build_merged(read1, read2, offset1, overlap, mismatches)?;
            return Ok(AssemblyResult::Merged {
                record,
                overlap,
                mismatches,
            });
        }
        if length_diff > 0 {
            length_diff -= 1;
        } else {
            overlap -= 1;
        }
        offset1 += 1;
    }

    Ok(AssemblyResult::NoOverlap)
}

/// Consensus-call two equal-length overlapping windows.
///
/// Positions where the bases agree (case-insensitively) keep `seq1`'s byte.
/// Disagreeing positions take the base with the strictly higher quality,
/// ties going to `seq1`. The output quality at every position is the
/// rounded mean of the two input qualities, whether or not the bases
/// agreed.
///
/// # Errors
///
/// Returns an error if the four slices are not all the same length.
pub fn consensus_merge(
    seq1: &[u8],
    qual1: &[u8],
    seq2: &[u8],
    qual2: &[u8],
) -> Result<(Vec<u8>, Vec<u8>)> {
    let len = seq1.len();
    if seq2.len() != len || qual1.len() != len || qual2.len() != len {
        return Err(PhysaliaError::InvalidInput(format!(
            "consensus windows must have equal lengths, got {}/{}/{}/{}",
            seq1.len(),
            qual1.len(),
            seq2.len(),
            qual2.len()
        )));
    }

    let mut bases = Vec::with_capacity(len);
    let mut quals = Vec::with_capacity(len);
    for i in 0..len {
        let (b1, b2) = (seq1[i], seq2[i]);
        let (q1, q2) = (qual1[i], qual2[i]);
        let base = if b1.eq_ignore_ascii_case(&b2) || q2 <= q1 {
            b1
        } else {
            b2
        };
        bases.push(base);
        quals.push(((q1 as u16 + q2 as u16 + 1) / 2) as u8);
    }
    Ok((bases, quals))
}

/// Stitch the merged record together: lower-cased left flank, upper-cased
/// overlap, lower-cased right flank from whichever read extends past the
/// join.
fn build_merged(
    read1: &SeqRecord,
    read2: &SeqRecord,
    offset1: usize,
    overlap: usize,
    mismatches: usize,
) -> Result<SeqRecord> {
    let seq1 = read1.seq();
    let seq2 = read2.seq();
    let both_qual = read1.qual().zip(read2.qual());

    let (mut overlap_seq, overlap_qual) = match both_qual {
        Some((q1, q2)) => {
            let (bases, quals) = consensus_merge(
                &seq1[offset1..offset1 + overlap],
                &q1[offset1..offset1 + overlap],
                &seq2[..overlap],
                &q2[..overlap],
            )?;
            (bases, Some(quals))
        }
        None => (seq1[offset1..offset1 + overlap].to_vec(), None),
    };
    overlap_seq.make_ascii_uppercase();

    let read1_extends = read1.len() > offset1 + overlap;

    let mut seq = seq1[..offset1].to_vec();
    seq.make_ascii_lowercase();
    seq.extend_from_slice(&overlap_seq);
    let mut right = if read1_extends {
        seq1[offset1 + overlap..].to_vec()
    } else {
        seq2[overlap..].to_vec()
    };
    right.make_ascii_lowercase();
    seq.extend_from_slice(&right);

    let qual = both_qual.map(|(q1, q2)| {
        let mut out = q1[..offset1].to_vec();
        out.extend_from_slice(overlap_qual.as_deref().unwrap_or_default());
        if read1_extends {
            out.extend_from_slice(&q1[offset1 + overlap..]);
        } else {
            out.extend_from_slice(&q2[overlap..]);
        }
        out
    });

    let name = read1
        .name()
        .map(|n| format!("{}:overlap={}:hamming={}", n, overlap, mismatches));

    SeqRecord::new(name, read1.kind(), seq, qual)
}
