//! Embedded prelude declarations.

use crate::declarations::DeclarationTable;
use crate::state::BinderState;
use orphan_parser::parse_source;
use orphan_solver::TypeInterner;
use std::sync::Arc;
use tracing::{debug, warn};

pub const PRELUDE_FILE_NAME: &str = "prelude.orp";
pub const PRELUDE_SOURCE: &str = include_str!("prelude.orp");

/// Parse and bind the prelude into `types`.
pub fn bind_prelude(types: &TypeInterner) -> Arc<DeclarationTable> {
    let (arena, root, parse_diagnostics) = parse_source(PRELUDE_FILE_NAME, PRELUDE_SOURCE);
    for diagnostic in &parse_diagnostics {
        warn!(message = %diagnostic.message, start = diagnostic.start, "prelude parse error");
    }
    let bound = BinderState::new(&arena, types, None).bind_source_file(root);
    for diagnostic in &bound.diagnostics {
        warn!(message = %diagnostic.message, span = %diagnostic.span, "prelude bind error");
    }
    debug!(
        types = bound.table.type_count(),
        methods = bound.table.method_count(),
        "bound prelude"
    );
    Arc::new(bound.table)
}
