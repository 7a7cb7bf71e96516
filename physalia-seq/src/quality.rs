//! Phred quality-score encoding for sequencing reads.
//!
//! Quality bytes are stored ASCII-encoded; a byte decodes to a score as
//! `byte - offset` for the chosen [`PhredEncoding`]. Decoded scores are
//! expected to lie in `[SCORE_MIN, SCORE_MAX]`.

/// Lowest valid decoded quality score.
pub const SCORE_MIN: u8 = 0;

/// Highest valid decoded quality score.
pub const SCORE_MAX: u8 = 40;

/// Quality score encoding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhredEncoding {
    /// Phred+33 (Sanger / Illumina 1.8+). Most common modern encoding.
    Phred33,
    /// Phred+64 (Illumina 1.3–1.7).
    Phred64,
}

impl PhredEncoding {
    /// ASCII offset added to a score when encoding.
    pub fn offset(self) -> u8 {
        match self {
            PhredEncoding::Phred33 => 33,
            PhredEncoding::Phred64 => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(PhredEncoding::Phred33.offset(), 33);
        assert_eq!(PhredEncoding::Phred64.offset(), 64);
    }

    #[test]
    fn score_bounds_ordered() {
        assert!(SCORE_MIN < SCORE_MAX);
    }
}
