//! Quality trimming for sequence reads.
//!
//! Two-level API, mirroring the rest of the crate:
//!
//! 1. **Low-level boundary scans** operate on `&[u8]` encoded quality
//!    slices: [`left_trim_boundary`] and [`right_trim_boundary`] each walk
//!    inward from one end looking for a run of `min_len` consecutive
//!    positions at or above `min_qual`.
//! 2. **High-level operations** operate on [`SeqRecord`]: [`trim_left`],
//!    [`trim_right`], and [`trim_both`] return a new trimmed record.
//!
//! A failed run probe skips past the failing position and the partial run
//! already counted, so each quality byte is inspected at most twice.

use physalia_core::{PhysaliaError, Result, Sequence};

use crate::quality::{PhredEncoding, SCORE_MAX};
use crate::record::SeqRecord;

/// Tuning knobs for quality trimming.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrimConfig {
    /// Minimum decoded score a position must reach to count toward a run.
    pub min_qual: u8,
    /// Run length required to stop trimming (≥ 1).
    pub min_len: usize,
    /// Encoding of the record's quality bytes.
    pub encoding: PhredEncoding,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            min_qual: 20,
            min_len: 3,
            encoding: PhredEncoding::Phred33,
        }
    }
}

/// Length to keep from the start when trimming the right end.
///
/// Scans backward from the end. At each distance `i` from the end, counts
/// how many consecutive positions (moving further inward) decode to at
/// least `min_qual`, up to `min_len`. A full run fixes the boundary at
/// `len - i`; a partial run advances `i` past it. Returns 0 when no run
/// exists.
pub fn right_trim_boundary(qual: &[u8], min_qual: u8, min_len: usize, score_base: u8) -> usize {
    let len = qual.len();
    let mut i = 0;
    while i < len {
        let mut c = 0;
        while c < min_len
            && c + i < len
            && qual[len - (c + i) - 1] as i32 - score_base as i32 >= min_qual as i32
        {
            c += 1;
        }
        if c == min_len {
            return len - i;
        }
        i += c + 1;
    }
    0
}

/// Offset to keep from when trimming the left end.
///
/// Symmetric to [`right_trim_boundary`], scanning forward from the start.
/// Returns `len` when no qualifying run exists.
pub fn left_trim_boundary(qual: &[u8], min_qual: u8, min_len: usize, score_base: u8) -> usize {
    let len = qual.len();
    let mut i = 0;
    while i < len {
        let mut c = 0;
        while c < min_len
            && c + i < len
            && qual[c + i] as i32 - score_base as i32 >= min_qual as i32
        {
            c += 1;
        }
        if c == min_len {
            return i;
        }
        i += c + 1;
    }
    len
}

/// Validate a trim call and hand back the record's quality bytes.
fn validated_qual<'a>(record: &'a SeqRecord, config: &TrimConfig) -> Result<&'a [u8]> {
    let qual = record.qual().ok_or_else(|| {
        PhysaliaError::InvalidInput("cannot quality-trim a record without quality scores".into())
    })?;
    if config.min_qual > SCORE_MAX {
        return Err(PhysaliaError::InvalidInput(format!(
            "min_qual must be at most {}, got {}",
            SCORE_MAX, config.min_qual
        )));
    }
    if config.min_len == 0 {
        return Err(PhysaliaError::InvalidInput(
            "min_len must be at least 1".into(),
        ));
    }
    Ok(qual)
}

/// Trim low-quality bases from the right (3') end.
///
/// # Errors
///
/// Returns an error if the record has no quality scores or the config is
/// out of range.
pub fn trim_right(record: &SeqRecord, config: &TrimConfig) -> Result<SeqRecord> {
    let qual = validated_qual(record, config)?;
    let end = right_trim_boundary(qual, config.min_qual, config.min_len, config.encoding.offset());
    record.slice(0, end)
}

/// Trim low-quality bases from the left (5') end.
///
/// # Errors
///
/// Returns an error if the record has no quality scores or the config is
/// out of range.
pub fn trim_left(record: &SeqRecord, config: &TrimConfig) -> Result<SeqRecord> {
    let qual = validated_qual(record, config)?;
    let start = left_trim_boundary(qual, config.min_qual, config.min_len, config.encoding.offset());
    record.slice(start, record.len())
}

/// Trim low-quality bases from both ends.
///
/// When the two scans cross (no usable interior), the left boundary is
/// clamped down to the right one and the result is empty rather than
/// inverted.
///
/// # Errors
///
/// Returns an error if the record has no quality scores or the config is
/// out of range.
pub fn trim_both(record: &SeqRecord, config: &TrimConfig) -> Result<SeqRecord> {
    let qual = validated_qual(record, config)?;
    let offset = config.encoding.offset();
    let right = right_trim_boundary(qual, config.min_qual, config.min_len, offset);
    let left = left_trim_boundary(qual, config.min_qual, config.min_len, offset).min(right);
    record.slice(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SeqKind;
    use physalia_core::Sequence;

    const BASE: u8 = 33;

    fn encode(scores: &[u8]) -> Vec<u8> {
        scores.iter().map(|&s| s + BASE).collect()
    }

    fn record(seq: &[u8], scores: &[u8]) -> SeqRecord {
        SeqRecord::new(
            Some("read1".into()),
            SeqKind::Dna,
            seq.to_vec(),
            Some(encode(scores)),
        )
        .unwrap()
    }

    fn config(min_qual: u8, min_len: usize) -> TrimConfig {
        TrimConfig {
            min_qual,
            min_len,
            ..TrimConfig::default()
        }
    }

    #[test]
    fn high_quality_read_is_untouched() {
        let r = record(b"ACGTACG", &[30, 30, 30, 30, 30, 30, 30]);
        let t = trim_both(&r, &config(20, 1)).unwrap();
        assert_eq!(t.seq(), b"ACGTACG");
        let t = trim_both(&r, &config(20, 3)).unwrap();
        assert_eq!(t.seq(), b"ACGTACG");
    }

    #[test]
    fn uniformly_low_quality_trims_everything() {
        // ASCII "2222222" decodes to Q17 under Phred+33
        let qual = b"2222222";
        assert_eq!(right_trim_boundary(qual, 20, 1, BASE), 0);
        assert_eq!(left_trim_boundary(qual, 20, 1, BASE), 7);

        let r = SeqRecord::new(
            None,
            SeqKind::Dna,
            b"ACGTACG".to_vec(),
            Some(qual.to_vec()),
        )
        .unwrap();
        let t = trim_both(&r, &config(20, 1)).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn boundaries_bracket_the_good_interior() {
        let scores = [10, 10, 30, 30, 30, 30, 10];
        let qual = encode(&scores);
        assert_eq!(left_trim_boundary(&qual, 20, 3, BASE), 2);
        assert_eq!(right_trim_boundary(&qual, 20, 3, BASE), 6);

        let r = record(b"ACGTACG", &scores);
        let t = trim_both(&r, &config(20, 3)).unwrap();
        assert_eq!(t.seq(), b"GTAC");
        assert_eq!(t.qual(), Some(&encode(&[30, 30, 30, 30])[..]));
    }

    #[test]
    fn partial_run_skips_past_the_break() {
        // Two good bases, a bad one, then a full run
        let qual = encode(&[30, 30, 10, 30, 30, 30]);
        assert_eq!(left_trim_boundary(&qual, 20, 3, BASE), 3);
    }

    #[test]
    fn right_boundary_reaches_an_interior_run() {
        let qual = encode(&[30, 30, 30, 10, 10]);
        assert_eq!(right_trim_boundary(&qual, 20, 3, BASE), 3);
    }

    #[test]
    fn run_longer_than_read_trims_everything() {
        let qual = encode(&[30, 30]);
        assert_eq!(left_trim_boundary(&qual, 20, 3, BASE), 2);
        assert_eq!(right_trim_boundary(&qual, 20, 3, BASE), 0);

        let r = record(b"AC", &[30, 30]);
        let t = trim_both(&r, &config(20, 3)).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn trim_right_keeps_the_left_side() {
        let r = record(b"ACGTAC", &[30, 30, 30, 30, 10, 10]);
        let t = trim_right(&r, &config(20, 3)).unwrap();
        assert_eq!(t.seq(), b"ACGT");
        assert_eq!(t.name(), Some("read1"));
    }

    #[test]
    fn trim_left_keeps_the_right_side() {
        let r = record(b"ACGTAC", &[10, 10, 30, 30, 30, 30]);
        let t = trim_left(&r, &config(20, 3)).unwrap();
        assert_eq!(t.seq(), b"GTAC");
    }

    #[test]
    fn missing_quality_is_rejected() {
        let r = SeqRecord::without_quality(None, SeqKind::Dna, b"ACGT".to_vec());
        assert!(trim_left(&r, &TrimConfig::default()).is_err());
        assert!(trim_right(&r, &TrimConfig::default()).is_err());
        assert!(trim_both(&r, &TrimConfig::default()).is_err());
    }

    #[test]
    fn out_of_range_min_qual_is_rejected() {
        let r = record(b"ACGT", &[30, 30, 30, 30]);
        assert!(trim_both(&r, &config(41, 1)).is_err());
    }

    #[test]
    fn zero_min_len_is_rejected() {
        let r = record(b"ACGT", &[30, 30, 30, 30]);
        assert!(trim_both(&r, &config(20, 0)).is_err());
    }

    #[test]
    fn phred64_offset_is_honored() {
        let scores = [10, 30, 30, 30, 10];
        let qual: Vec<u8> = scores.iter().map(|&s| s + 64).collect();
        let r = SeqRecord::new(None, SeqKind::Dna, b"ACGTA".to_vec(), Some(qual)).unwrap();
        let cfg = TrimConfig {
            min_qual: 20,
            min_len: 3,
            encoding: PhredEncoding::Phred64,
        };
        let t = trim_both(&r, &cfg).unwrap();
        assert_eq!(t.seq(), b"CGT");
    }

    #[test]
    fn empty_record_trims_to_empty() {
        let r = SeqRecord::new(None, SeqKind::Dna, Vec::new(), Some(Vec::new())).unwrap();
        let t = trim_both(&r, &TrimConfig::default()).unwrap();
        assert!(t.is_empty());
    }
}
