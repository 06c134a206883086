use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::tree::SyntaxTree;
use crate::core::types::{SubmissionId, SubmissionPair};
use crate::detector::{AlgorithmResults, SimilarityDetector};
use crate::matching::engine::EngineError;
use crate::utils::validation::{check_submission_limit, BATCH_STACK_SIZE};

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("{0}")]
    TooManySubmissions(String),

    #[error("Failed to start detection workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A parsed submission
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub tree: SyntaxTree,
}

impl Submission {
    pub fn new(id: impl Into<String>, tree: SyntaxTree) -> Self {
        Self {
            id: SubmissionId::new(id),
            tree,
        }
    }
}

/// Outcome for one pair; a failure here never affects the other pairs
#[derive(Debug)]
pub struct PairOutcome {
    pub pair: SubmissionPair,
    pub result: Result<AlgorithmResults, EngineError>,
}

/// Run `detector` over every unordered pair of `submissions`.
///
/// Pairs are scored in parallel on a dedicated pool whose workers get
/// [`BATCH_STACK_SIZE`] of stack, and returned in a stable order: `(0, 1)`,
/// `(0, 2)`, ..., `(1, 2)`, ...
///
/// # Errors
///
/// Returns `BatchError::TooManySubmissions` if the batch exceeds the
/// submission limit, or `BatchError::ThreadPool` if the workers cannot be
/// started. Per-pair failures are reported in each [`PairOutcome`].
pub fn detect_all<D>(
    detector: &D,
    submissions: &[Submission],
) -> Result<Vec<PairOutcome>, BatchError>
where
    D: SimilarityDetector + ?Sized,
{
    if let Some(message) = check_submission_limit(submissions.len()) {
        return Err(BatchError::TooManySubmissions(message));
    }

    let indices: Vec<(usize, usize)> = (0..submissions.len())
        .flat_map(|i| (i + 1..submissions.len()).map(move |j| (i, j)))
        .collect();

    info!(
        detector = detector.name(),
        submissions = submissions.len(),
        pairs = indices.len(),
        "Starting pairwise detection"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .stack_size(BATCH_STACK_SIZE)
        .build()?;

    let outcomes: Vec<PairOutcome> = pool.install(|| {
        indices
            .into_par_iter()
            .map(|(i, j)| {
                let (a, b) = (&submissions[i], &submissions[j]);
                let pair = SubmissionPair {
                    a: a.id.clone(),
                    b: b.id.clone(),
                };
                let result = detector.detect_similarity(&pair, &a.tree, &b.tree);
                if let Err(e) = &result {
                    warn!(pair = %pair, error = %e, "Skipping submission pair");
                }
                PairOutcome { pair, result }
            })
            .collect()
    });

    Ok(outcomes)
}
