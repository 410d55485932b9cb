//! Binder and reference type resolver.
//!
//! Binding lowers every declaration of a file (`extern type`, `extern fn`,
//! `fn`) into a `DeclarationTable` of interned signatures, layered over the
//! embedded prelude. `ExpressionTyper` then answers "what is the type of
//! this expression" on demand, caching per node.

pub mod declarations;
pub use declarations::{DeclarationTable, Signature};

mod lowering;
pub use lowering::TypeLowering;

mod state;
pub use state::{BindDiagnostic, BinderState, BoundFile};

pub mod prelude;
pub use prelude::{PRELUDE_FILE_NAME, PRELUDE_SOURCE, bind_prelude};

pub mod scope;
pub use scope::{LocalBinding, resolve_local};

mod typer;
pub use typer::{ExpressionTyper, TypeResolveError};
