//! Parallel analysis over top-level declarations.

use crate::classifier::HandleClassifier;
use crate::diagnostics::Diagnostic;
use crate::host::{ResolveError, SyntaxTree, TypeResolver};
use crate::rules::{RuleContext, RuleSet};
use crate::stream::{DiagnosticStream, check_node};
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Cooperative cancellation, checked between top-level declarations.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Result of `analyze_parallel`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    pub diagnostics: Vec<Diagnostic>,
    /// Top-level declarations fully analyzed, counted in declaration order.
    pub completed: usize,
    pub cancelled: bool,
}

/// Analyze each top-level declaration on the rayon pool.
///
/// Results are concatenated in declaration order, so the diagnostics equal
/// those of `DiagnosticStream::new` over the same tree. After cancellation
/// the result holds the longest prefix of declarations that completed.
pub fn analyze_parallel<T, R>(
    tree: &T,
    resolver: &R,
    classifier: &HandleClassifier<R::Type>,
    rules: RuleSet,
    cancel: &CancellationToken,
) -> Result<Analysis, ResolveError>
where
    T: SyntaxTree + Sync + ?Sized,
    R: TypeResolver<Node = T::Node> + Sync + ?Sized,
{
    let root = tree.root();
    let mut diagnostics = Vec::new();
    if !rules.is_empty() {
        check_node(
            RuleContext::new(tree, resolver, classifier),
            rules,
            root,
            &mut diagnostics,
        )?;
    }

    let declarations = tree.children(root);
    debug!(declarations = declarations.len(), "parallel analysis");
    let per_declaration: Vec<Option<Result<Vec<Diagnostic>, ResolveError>>> = declarations
        .as_slice()
        .par_iter()
        .map(|&declaration| {
            if cancel.is_cancelled() {
                return None;
            }
            Some(DiagnosticStream::from_node(tree, resolver, classifier, rules, declaration).collect())
        })
        .collect();

    let mut completed = 0;
    for result in per_declaration {
        match result {
            Some(found) => {
                diagnostics.extend(found?);
                completed += 1;
            }
            None => {
                debug!(completed, "parallel analysis cancelled");
                return Ok(Analysis {
                    diagnostics,
                    completed,
                    cancelled: true,
                });
            }
        }
    }
    Ok(Analysis {
        diagnostics,
        completed,
        cancelled: false,
    })
}
