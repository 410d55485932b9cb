//! ORP001: a handle-typed expression used as a bare statement.
//!
//! ```text
//! handleCall();          // reported: the work is abandoned
//! await handleCall();    // anchored by suspension
//! _ = handleCall();      // anchored by (discard) assignment
//! flag ? count() : handleCall();  // reported once, at the conditional
//! ```

use super::RuleContext;
use crate::diagnostics::{Diagnostic, RuleId};
use crate::host::{NodeKind, ResolveError, Slot, SyntaxTree, TypeResolver};
use tracing::trace;

pub fn check<T, R>(cx: &RuleContext<'_, T, R>, statement: T::Node) -> Result<Option<Diagnostic>, ResolveError>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    if cx.tree.kind(statement) != NodeKind::ExpressionStatement {
        return Ok(None);
    }
    // A malformed statement has no expression child.
    let Some(&expression) = cx.tree.children(statement).first() else {
        return Ok(None);
    };
    let expression = cx.skip_parentheses(expression);
    if !discards_handle(cx, expression)? {
        return Ok(None);
    }

    trace!(?expression, "dangling invocation");
    Ok(Some(cx.diagnostic(RuleId::DanglingInvocation, expression)))
}

/// Whether evaluating `expression` for its effect drops a handle.
///
/// A conditional drops whatever either branch produces, so it is judged by
/// its branches rather than by its own type.
fn discards_handle<T, R>(cx: &RuleContext<'_, T, R>, expression: T::Node) -> Result<bool, ResolveError>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    match cx.tree.kind(expression) {
        // Suspension and assignment anchor the handle.
        NodeKind::Await | NodeKind::Assignment { .. } => Ok(false),
        NodeKind::Conditional => {
            for branch in cx.tree.children(expression) {
                if cx.tree.slot(expression, branch) == Slot::Branch
                    && discards_handle(cx, cx.skip_parentheses(branch))?
                {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        _ => {
            let Some(ty) = cx.resolver.resolve(expression)? else {
                return Ok(false);
            };
            let handle = cx.classifier.classify(cx.resolver, ty).is_handle;
            if handle {
                trace!(?expression, ty = %cx.resolver.display(ty), "handle-typed statement");
            }
            Ok(handle)
        }
    }
}
