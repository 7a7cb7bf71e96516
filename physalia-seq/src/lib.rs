//! Paired-read overlap assembly and quality trimming.
//!
//! Two kernels over quality-scored sequence reads:
//!
//! - **Overlap assembly** — [`assemble`] merges two partially-overlapping
//!   reads into one consensus record, matching residues under IUPAC
//!   ambiguity codes ([`bases_match`], [`count_mismatches`]) and resolving
//!   disagreements by quality ([`consensus_merge`]).
//! - **Quality trimming** — [`trim_left`], [`trim_right`], and
//!   [`trim_both`] cut low-confidence ends off a single read using a
//!   greedy minimum-quality run scan.
//!
//! Both operate on [`SeqRecord`], an immutable value type pairing residues
//! with optional encoded quality bytes. All operations are pure functions:
//! no shared mutable state, safe to fan out across read pairs.
//!
//! # Example
//!
//! ```
//! use physalia_seq::{assemble, AssemblyResult, MergeConfig, SeqKind, SeqRecord};
//!
//! let r1 = SeqRecord::without_quality(Some("pair".into()), SeqKind::Dna, b"ATCGATCG".to_vec());
//! let r2 = SeqRecord::without_quality(None, SeqKind::Dna, b"CGATCGTT".to_vec());
//!
//! let config = MergeConfig { overlap_min: 4, ..MergeConfig::default() };
//! match assemble(&r1, &r2, &config).unwrap() {
//!     AssemblyResult::Merged { record, overlap, mismatches } => {
//!         assert_eq!(record.seq(), b"atCGATCGtt");
//!         assert_eq!(overlap, 6);
//!         assert_eq!(mismatches, 0);
//!     }
//!     AssemblyResult::NoOverlap => unreachable!(),
//! }
//! ```

pub mod ambig;
pub mod merge;
pub mod quality;
pub mod record;
pub mod trim;

// Re-export the matching kernel
pub use ambig::{bases_match, count_mismatches};

// Re-export assembly types and operations
pub use merge::{assemble, consensus_merge, AssemblyResult, MergeConfig};

// Re-export quality encoding
pub use quality::{PhredEncoding, SCORE_MAX, SCORE_MIN};

// Re-export the record types
pub use record::{SeqKind, SeqRecord};

// Re-export trimming operations
pub use trim::{
    left_trim_boundary, right_trim_boundary, trim_both, trim_left, trim_right, TrimConfig,
};
