//! Batch education: many documents processed in parallel.
//!
//! The extension is immutable after construction, so documents can be
//! educated concurrently with plain data parallelism; each run owns its
//! own scan state.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::extension::SmartPunctuation;

/// Input for batch education: one document to process.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// Document text.
    pub source: String,
}

/// Result for a single document in a batch.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Document identifier matching the input.
    pub id: String,
    /// Educated text.
    pub output: String,
    /// Whether education changed the document at all.
    pub changed: bool,
}

/// Statistics for a batch run.
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Total number of documents processed.
    pub total: u32,
    /// Number of documents education actually changed.
    pub changed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch education.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to the number of CPU
    /// cores.
    pub max_threads: Option<u32>,
}

/// Result of batch education containing all results and statistics.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Individual results, in input order.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Educates every input document, in parallel, preserving input order.
pub fn educate_batch(
    extension: &SmartPunctuation,
    inputs: Vec<BatchInput>,
    options: Option<BatchOptions>,
) -> BatchOutcome {
    let start = Instant::now();
    let opts = options.unwrap_or_default();

    // Configure a dedicated pool only when a thread cap is requested.
    let pool = if let Some(max_threads) = opts.max_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads as usize)
            .build()
            .ok()
    } else {
        None
    };

    let total = inputs.len() as u32;
    let changed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        let output = extension.educate_document(&input.source);
        let did_change = output != input.source;
        if did_change {
            changed.fetch_add(1, Ordering::Relaxed);
        }
        BatchResult {
            id: input.id,
            output,
            changed: did_change,
        }
    };

    let results: Vec<BatchResult> = if let Some(pool) = pool {
        pool.install(|| inputs.into_par_iter().map(process_input).collect())
    } else {
        inputs.into_par_iter().map(process_input).collect()
    };

    let elapsed = start.elapsed();
    BatchOutcome {
        results,
        stats: BatchStats {
            total,
            changed: changed.load(Ordering::Relaxed),
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str, source: &str) -> BatchInput {
        BatchInput {
            id: id.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn results_preserve_input_order() {
        let extension = SmartPunctuation::with_defaults();
        let outcome = educate_batch(
            &extension,
            vec![
                input("a", "one -- two"),
                input("b", "no punctuation"),
                input("c", "the '80s"),
            ],
            None,
        );
        let ids: Vec<&str> = outcome.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(outcome.results[0].output, "one &ndash; two");
        assert_eq!(outcome.results[1].output, "no punctuation");
        assert_eq!(outcome.results[2].output, "the &rsquo;80s");
    }

    #[test]
    fn stats_count_total_and_changed() {
        let extension = SmartPunctuation::with_defaults();
        let outcome = educate_batch(
            &extension,
            vec![
                input("a", "dash -- here"),
                input("b", "plain"),
                input("c", "\"quoted\""),
            ],
            None,
        );
        assert_eq!(outcome.stats.total, 3);
        assert_eq!(outcome.stats.changed, 2);
        assert!(!outcome.results[1].changed);
    }

    #[test]
    fn thread_cap_is_honored() {
        let extension = SmartPunctuation::with_defaults();
        let inputs: Vec<BatchInput> = (0..32)
            .map(|i| input(&i.to_string(), "wait... done"))
            .collect();
        let outcome = educate_batch(
            &extension,
            inputs,
            Some(BatchOptions {
                max_threads: Some(2),
            }),
        );
        assert_eq!(outcome.stats.total, 32);
        assert!(
            outcome
                .results
                .iter()
                .all(|r| r.output == "wait&hellip; done")
        );
    }
}
