//! Lazy diagnostic stream.

use crate::classifier::HandleClassifier;
use crate::diagnostics::Diagnostic;
use crate::host::{ResolveError, SyntaxTree, TypeResolver};
use crate::parallel::CancellationToken;
use crate::rules::{RuleContext, RuleSet};
use std::collections::VecDeque;
use tracing::{Span, debug, debug_span};

/// Pre-order, source-order walk that runs the selected rules on every node.
///
/// The stream is lazy and finite; diagnostics come out ordered by position.
/// Rebuilding it (or calling `restart`) over unchanged input reproduces the
/// same sequence. A resolver failure is yielded once as `Err` and ends the
/// stream.
pub struct DiagnosticStream<'a, T, R>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    cx: RuleContext<'a, T, R>,
    rules: RuleSet,
    start: T::Node,
    stack: Vec<T::Node>,
    pending: VecDeque<Diagnostic>,
    cancel: Option<CancellationToken>,
    emitted: usize,
    done: bool,
    span: Span,
}

impl<'a, T, R> DiagnosticStream<'a, T, R>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    /// Stream over the whole tree.
    pub fn new(
        tree: &'a T,
        resolver: &'a R,
        classifier: &'a HandleClassifier<R::Type>,
        rules: RuleSet,
    ) -> Self {
        Self::from_node(tree, resolver, classifier, rules, tree.root())
    }

    /// Stream over the subtree rooted at `start`.
    pub fn from_node(
        tree: &'a T,
        resolver: &'a R,
        classifier: &'a HandleClassifier<R::Type>,
        rules: RuleSet,
        start: T::Node,
    ) -> Self {
        DiagnosticStream {
            cx: RuleContext::new(tree, resolver, classifier),
            rules,
            start,
            stack: vec![start],
            pending: VecDeque::new(),
            cancel: None,
            emitted: 0,
            done: rules.is_empty(),
            span: debug_span!("diagnostic_stream", ?start),
        }
    }

    /// Stop before the next child of the start node once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Rewind to the beginning.
    pub fn restart(&mut self) {
        self.stack.clear();
        self.stack.push(self.start);
        self.pending.clear();
        self.emitted = 0;
        self.done = self.rules.is_empty();
    }

    fn cancelled_at(&self, node: T::Node) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
            && self.cx.tree.parent(node) == Some(self.start)
    }

    fn finish(&mut self) {
        self.done = true;
        self.stack.clear();
        debug!(emitted = self.emitted, "diagnostic stream finished");
    }
}

impl<T, R> Iterator for DiagnosticStream<'_, T, R>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    type Item = Result<Diagnostic, ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.span.clone();
        let _guard = span.enter();
        loop {
            if let Some(diagnostic) = self.pending.pop_front() {
                self.emitted += 1;
                return Some(Ok(diagnostic));
            }
            if self.done {
                return None;
            }
            let Some(node) = self.stack.pop() else {
                self.finish();
                return None;
            };
            if self.cancelled_at(node) {
                debug!("analysis cancelled");
                self.finish();
                return None;
            }
            let children = self.cx.tree.children(node);
            self.stack.extend(children.into_iter().rev());

            if let Err(err) = check_node(self.cx, self.rules, node, &mut self.pending) {
                self.pending.clear();
                self.finish();
                return Some(Err(err));
            }
        }
    }
}

/// Run every selected rule on one node, in rule order.
pub(crate) fn check_node<T, R>(
    cx: RuleContext<'_, T, R>,
    rules: RuleSet,
    node: T::Node,
    out: &mut impl Extend<Diagnostic>,
) -> Result<(), ResolveError>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    for rule in rules.iter() {
        if let Some(diagnostic) = cx.check(rule, node)? {
            out.extend(Some(diagnostic));
        }
    }
    Ok(())
}
