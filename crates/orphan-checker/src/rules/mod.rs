//! Detection rules.
//!
//! Each rule inspects one node and yields at most one diagnostic for it.
//! The dangling-invocation rule fires on expression statements; the
//! unobserved-result rule fires on `await` expressions. Both are pure: the
//! only state they touch is the classifier memo.

use crate::classifier::HandleClassifier;
use crate::diagnostics::{Diagnostic, RuleId};
use crate::enclosing::declaration_metadata;
use crate::host::{NodeKind, ResolveError, SyntaxTree, TypeResolver};

pub mod dangling;
pub mod unobserved;

/// Which rules run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleSet {
    dangling_invocation: bool,
    unobserved_result: bool,
}

impl RuleSet {
    pub const fn all() -> Self {
        RuleSet {
            dangling_invocation: true,
            unobserved_result: true,
        }
    }

    pub const fn none() -> Self {
        RuleSet {
            dangling_invocation: false,
            unobserved_result: false,
        }
    }

    pub fn only(rule: RuleId) -> Self {
        RuleSet::none().with(rule)
    }

    pub fn with(mut self, rule: RuleId) -> Self {
        self.set(rule, true);
        self
    }

    pub fn without(mut self, rule: RuleId) -> Self {
        self.set(rule, false);
        self
    }

    fn set(&mut self, rule: RuleId, enabled: bool) {
        match rule {
            RuleId::DanglingInvocation => self.dangling_invocation = enabled,
            RuleId::UnobservedResult => self.unobserved_result = enabled,
        }
    }

    pub fn contains(&self, rule: RuleId) -> bool {
        match rule {
            RuleId::DanglingInvocation => self.dangling_invocation,
            RuleId::UnobservedResult => self.unobserved_result,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.dangling_invocation && !self.unobserved_result
    }

    pub fn iter(&self) -> impl Iterator<Item = RuleId> + '_ {
        RuleId::ALL.into_iter().filter(|rule| self.contains(*rule))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::all()
    }
}

/// Everything a rule needs to judge a node.
pub struct RuleContext<'a, T, R>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    pub tree: &'a T,
    pub resolver: &'a R,
    pub classifier: &'a HandleClassifier<R::Type>,
}

impl<'a, T, R> RuleContext<'a, T, R>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    pub fn new(tree: &'a T, resolver: &'a R, classifier: &'a HandleClassifier<R::Type>) -> Self {
        RuleContext {
            tree,
            resolver,
            classifier,
        }
    }

    /// Run one rule against `node`.
    pub fn check(&self, rule: RuleId, node: T::Node) -> Result<Option<Diagnostic>, ResolveError> {
        match rule {
            RuleId::DanglingInvocation => dangling::check(self, node),
            RuleId::UnobservedResult => unobserved::check(self, node),
        }
    }

    /// Look through any number of parentheses.
    pub(crate) fn skip_parentheses(&self, mut node: T::Node) -> T::Node {
        while self.tree.kind(node) == NodeKind::Parenthesized {
            match self.tree.children(node).first() {
                Some(&inner) => node = inner,
                None => break,
            }
        }
        node
    }

    pub(crate) fn diagnostic(&self, rule: RuleId, node: T::Node) -> Diagnostic {
        Diagnostic {
            rule,
            span: self.tree.span(node),
            enclosing: declaration_metadata(self.tree, node),
            expression_text: self.tree.text(node).to_string(),
        }
    }
}

impl<T, R> Clone for RuleContext<'_, T, R>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, R> Copy for RuleContext<'_, T, R>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
}
