//! ORP002: an awaited value-carrying handle whose result is discarded.
//!
//! ```text
//! await valueCall();          // reported: the int is thrown away
//! var n = await valueCall();  // captured
//! await handleCall();         // value-less, nothing to observe
//! ```

use super::RuleContext;
use crate::context::{ConsumingContext, consuming_context};
use crate::diagnostics::{Diagnostic, RuleId};
use crate::host::{NodeKind, ResolveError, SyntaxTree, TypeResolver};
use tracing::trace;

pub fn check<T, R>(cx: &RuleContext<'_, T, R>, suspension: T::Node) -> Result<Option<Diagnostic>, ResolveError>
where
    T: SyntaxTree + ?Sized,
    R: TypeResolver<Node = T::Node> + ?Sized,
{
    if cx.tree.kind(suspension) != NodeKind::Await {
        return Ok(None);
    }
    let Some(&operand) = cx.tree.children(suspension).first() else {
        return Ok(None);
    };
    let Some(ty) = cx.resolver.resolve(operand)? else {
        return Ok(None);
    };
    let classification = cx.classifier.classify(cx.resolver, ty);
    if !classification.is_handle || !classification.is_value_carrying {
        return Ok(None);
    }
    if consuming_context(cx.tree, suspension) != ConsumingContext::Discarded {
        return Ok(None);
    }

    trace!(?suspension, ty = %cx.resolver.display(ty), "unobserved result");
    Ok(Some(cx.diagnostic(RuleId::UnobservedResult, suspension)))
}
