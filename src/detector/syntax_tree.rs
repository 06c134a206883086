use tracing::debug;

use crate::core::tree::SyntaxTree;
use crate::core::types::SubmissionPair;
use crate::detector::{AlgorithmResults, DetectorConfig, SimilarityDetector};
use crate::matching::engine::{check_compatible, EngineError};
use crate::matching::fingerprint::{self, Fingerprinter, TopLevelFingerprinter};
use crate::parsing::json::JsonTreeParser;
use crate::parsing::TreeParser;
use crate::utils::validation::{check_depth, compute_signature};

/// Name under which the structural detector is registered
pub const DETECTOR_NAME: &str = "syntaxtree";

/// Structural detector: compares syntax trees fingerprint by fingerprint
pub struct SyntaxTreeDetector<F = TopLevelFingerprinter> {
    config: DetectorConfig,
    fingerprinter: F,
}

impl SyntaxTreeDetector {
    /// Create a detector that fingerprints at the top level of each tree
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            fingerprinter: TopLevelFingerprinter,
        }
    }
}

impl<F: Fingerprinter> SyntaxTreeDetector<F> {
    /// Create a detector with a custom fingerprint decomposition
    pub fn with_fingerprinter(config: DetectorConfig, fingerprinter: F) -> Self {
        Self {
            config,
            fingerprinter,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

impl Default for SyntaxTreeDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl<F: Fingerprinter> SimilarityDetector for SyntaxTreeDetector<F> {
    fn name(&self) -> &str {
        DETECTOR_NAME
    }

    fn parser(&self) -> Box<dyn TreeParser> {
        Box::new(JsonTreeParser::new(self.config.default_grammar.clone()))
    }

    fn detect_similarity(
        &self,
        pair: &SubmissionPair,
        a: &SyntaxTree,
        b: &SyntaxTree,
    ) -> Result<AlgorithmResults, EngineError> {
        check_compatible(a, b)?;
        check_depth(&a.root, self.config.max_depth)?;
        check_depth(&b.root, self.config.max_depth)?;

        let fingerprints_a = self.fingerprinter.fingerprints(&a.root);
        let fingerprints_b = self.fingerprinter.fingerprints(&b.root);

        let (a_matched_by_b, b_matched_by_a) = fingerprint::detect(
            pair,
            &fingerprints_a,
            &fingerprints_b,
            self.config.aggregation,
        );

        let identical = compute_signature(&a.root) == compute_signature(&b.root);
        if identical {
            debug!(pair = %pair, "Submissions are structurally identical");
        }

        Ok(AlgorithmResults {
            pair: pair.clone(),
            a_matched_by_b,
            b_matched_by_a,
            identical,
        })
    }
}
