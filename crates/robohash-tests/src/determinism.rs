//! Determinism checks: run a generator repeatedly and compare the bytes.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// First mismatch found, if any.
    pub diff: Option<DiffInfo>,
}

/// First difference between the reference run and a later run.
#[derive(Debug, Clone)]
pub struct DiffInfo {
    /// Byte offset of the first difference (or the shorter length).
    pub offset: usize,
    /// Which run (0-indexed) differed.
    pub run_index: usize,
    /// Lengths of the reference and differing outputs.
    pub lengths: (usize, usize),
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {} differs at byte {} (lengths {} vs {})",
            self.run_index, self.offset, self.lengths.0, self.lengths.1
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff {
            panic!(
                "Non-deterministic output detected!\nRuns: {}\nHash: {}\n{}",
                self.runs, self.hash, diff
            );
        }
    }
}

/// Runs `generate_fn` `runs` times and compares every output to the first.
pub fn verify_determinism<F, O>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> O,
    O: AsRef<[u8]>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let reference = reference.as_ref();
    let hash = blake3::hash(reference).to_hex().to_string();

    for run_index in 1..runs {
        let output = generate_fn();
        let output = output.as_ref();
        if output != reference {
            let offset = reference
                .iter()
                .zip(output)
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| reference.len().min(output.len()));
            return DeterminismResult {
                is_deterministic: false,
                runs,
                hash,
                diff: Some(DiffInfo {
                    offset,
                    run_index,
                    lengths: (reference.len(), output.len()),
                }),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        hash,
        diff: None,
    }
}
