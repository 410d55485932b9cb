//! Analysis driver: discover sources, then parse, bind and analyze them in
//! parallel.
//!
//! Every file is bound before the classifier is built, so handle shapes
//! resolve against the complete type universe of the run.

use crate::args::CliArgs;
use crate::config::OrphanConfig;
use anyhow::{Context, Result};
use orphan_binder::{BinderState, BoundFile, ExpressionTyper, bind_prelude};
use orphan_checker::host::arena::{ArenaResolver, ArenaTree, InternerIdentity};
use orphan_checker::{
    Diagnostic, DiagnosticStream, HandleClassifier, NoSuppression, ResolveError, RuleSet,
    SuppressionPolicy,
};
use orphan_common::Span;
use orphan_parser::{NodeArena, NodeIndex, parse_source};
use orphan_solver::{TypeId, TypeInterner};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info_span, warn};

/// Extension of reference-host source files.
pub const SOURCE_EXTENSION: &str = "orp";

/// Worker stack size. Parsing and typing recurse on expression depth.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemKind {
    Syntax,
    Declaration,
}

/// A parse or bind error in a source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceProblem {
    pub kind: ProblemKind,
    pub span: Span,
    pub message: String,
}

/// Everything found in one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub source: String,
    pub problems: Vec<SourceProblem>,
    pub findings: Vec<Diagnostic>,
    /// Set when the resolver failed; `findings` holds what came before it.
    pub resolve_error: Option<ResolveError>,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn finding_count(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }

    pub fn has_errors(&self, config: &OrphanConfig) -> bool {
        self.files.iter().any(|file| {
            !file.problems.is_empty()
                || file.resolve_error.is_some()
                || file
                    .findings
                    .iter()
                    .any(|d| config.severity(d.rule).is_error())
        })
    }

    /// 1 when anything error-level was reported, else 0.
    pub fn exit_code(&self, config: &OrphanConfig) -> i32 {
        i32::from(self.has_errors(config))
    }
}

/// Expand the command-line paths into a sorted, deduplicated file list.
///
/// Directories are walked recursively for `.orp` files; explicit files are
/// taken as given.
pub fn discover_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in walkdir::WalkDir::new(path).follow_links(true) {
                let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
                if entry.file_type().is_file() && has_source_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            anyhow::bail!("no such file or directory: {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Run the whole pipeline for the parsed command line.
pub fn run(args: &CliArgs, config: &OrphanConfig) -> Result<RunReport> {
    let files = discover_sources(&args.paths)?;
    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        sources.push((path, source));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .stack_size(WORKER_STACK_SIZE)
        .build()
        .context("failed to build worker pool")?;
    Ok(pool.install(|| analyze_sources(sources, config, !args.no_suppress)))
}

struct ParsedFile {
    path: PathBuf,
    source: String,
    arena: NodeArena,
    root: NodeIndex,
    problems: Vec<SourceProblem>,
}

/// Parse, bind and analyze in-memory sources. Output order follows input order.
pub fn analyze_sources(
    sources: Vec<(PathBuf, String)>,
    config: &OrphanConfig,
    suppress: bool,
) -> RunReport {
    let _span = info_span!("analyze_sources", files = sources.len()).entered();
    let started = Instant::now();

    let types = TypeInterner::new();
    let prelude = bind_prelude(&types);

    let mut parsed: Vec<ParsedFile> = sources
        .into_par_iter()
        .map(|(path, source)| {
            let (arena, root, parse_diagnostics) =
                parse_source(path.display().to_string(), source.clone());
            let problems = parse_diagnostics
                .into_iter()
                .map(|d| SourceProblem {
                    kind: ProblemKind::Syntax,
                    span: Span::new(d.start, d.start + d.length),
                    message: d.message,
                })
                .collect();
            ParsedFile {
                path,
                source,
                arena,
                root,
                problems,
            }
        })
        .collect();

    let bound: Vec<BoundFile> = parsed
        .par_iter()
        .map(|file| BinderState::new(&file.arena, &types, Some(Arc::clone(&prelude))).bind_source_file(file.root))
        .collect();
    for (file, bound) in parsed.iter_mut().zip(&bound) {
        file.problems.extend(bound.diagnostics.iter().map(|d| SourceProblem {
            kind: ProblemKind::Declaration,
            span: d.span,
            message: d.message.clone(),
        }));
    }

    let classifier = HandleClassifier::new(&InternerIdentity::new(&types), &config.shape_config());
    if classifier.resolved_shape_count() == 0 {
        warn!("no handle shape resolved; nothing can be reported");
    }
    let rules = config.rule_set();
    let policy: &dyn SuppressionPolicy = if suppress { &config.suppress } else { &NoSuppression };

    let files: Vec<FileReport> = parsed
        .into_par_iter()
        .zip(bound.par_iter())
        .map(|(file, bound)| {
            let (findings, resolve_error) = analyze_file(&file, bound, &types, &classifier, rules);
            FileReport {
                path: file.path,
                source: file.source,
                problems: file.problems,
                findings: policy.filter(findings),
                resolve_error,
            }
        })
        .collect();

    let report = RunReport { files };
    debug!(
        files = report.files.len(),
        findings = report.finding_count(),
        types = types.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "analysis finished"
    );
    report
}

fn analyze_file(
    file: &ParsedFile,
    bound: &BoundFile,
    types: &TypeInterner,
    classifier: &HandleClassifier<TypeId>,
    rules: RuleSet,
) -> (Vec<Diagnostic>, Option<ResolveError>) {
    let typer = ExpressionTyper::new(&file.arena, types, &bound.table);
    let resolver = ArenaResolver::new(&typer);
    let tree = ArenaTree::new(&file.arena, file.root);

    let mut findings = Vec::new();
    for result in DiagnosticStream::new(&tree, &resolver, classifier, rules) {
        match result {
            Ok(diagnostic) => findings.push(diagnostic),
            Err(err) => {
                warn!(path = %file.path.display(), %err, "analysis stopped");
                return (findings, Some(err));
            }
        }
    }
    (findings, None)
}
