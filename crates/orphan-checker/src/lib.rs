//! Discarded-asynchronous-work analysis.
//!
//! The pass finds two shapes of lost asynchronous work:
//! - a handle-typed expression used as a bare statement (`ORP001`,
//!   dangling invocation): the work is started and abandoned, so any failure
//!   it raises is lost;
//! - an `await` of a value-carrying handle whose result is discarded
//!   (`ORP002`, unobserved result).
//!
//! Components, leaf first:
//! - `host` - the traits the pass consumes (`SyntaxTree`, `TypeIdentity`,
//!   `TypeResolver`) and the adapter for the reference host (`host::arena`)
//! - `classifier` - `HandleClassifier`, memoized handle-shape matching
//! - `context` - `consuming_context`, the captured/discarded ancestor walk
//! - `rules` - the two rules and `RuleSet`
//! - `stream` - `DiagnosticStream`, the lazy pre-order diagnostic iterator
//! - `parallel` - `analyze_parallel` and `CancellationToken`
//! - `suppression` - the optional post-hoc `SuppressionPolicy` layer

pub mod host;
pub use host::{NodeKind, ResolveError, Slot, SyntaxTree, TypeIdentity, TypeResolver};

pub mod classifier;
pub use classifier::{
    Classification, DEFAULT_HANDLE_FAMILY, HandleClassifier, HandleShape, HandleShapeConfig,
};

pub mod context;
pub use context::{ConsumingContext, consuming_context};

pub mod diagnostics;
pub use diagnostics::{DeclarationMetadata, Diagnostic, RuleId};

mod enclosing;
pub use enclosing::{declaration_metadata, enclosing_declaration};

pub mod rules;
pub use rules::RuleSet;

mod stream;
pub use stream::DiagnosticStream;

mod parallel;
pub use parallel::{Analysis, CancellationToken, analyze_parallel};

pub mod suppression;
pub use suppression::{NoSuppression, RolePolicy, SuppressionPolicy};
