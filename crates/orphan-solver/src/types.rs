//! Type identities and structural keys.

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// An interned, canonical type identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ERROR: TypeId = TypeId(0);
    pub const VOID: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const BOOL: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);
    pub const NULL: TypeId = TypeId(5);
    pub const OBJECT: TypeId = TypeId(6);
    /// The type of every lambda.
    pub const FUNCTION: TypeId = TypeId(7);

    /// First id handed out to non-intrinsic types.
    pub const FIRST_USER: u32 = 8;

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Error,
    Void,
    Int,
    Bool,
    String,
    Null,
    Object,
    Function,
}

impl IntrinsicKind {
    pub const ALL: [IntrinsicKind; 8] = [
        IntrinsicKind::Error,
        IntrinsicKind::Void,
        IntrinsicKind::Int,
        IntrinsicKind::Bool,
        IntrinsicKind::String,
        IntrinsicKind::Null,
        IntrinsicKind::Object,
        IntrinsicKind::Function,
    ];

    pub fn type_id(self) -> TypeId {
        match self {
            IntrinsicKind::Error => TypeId::ERROR,
            IntrinsicKind::Void => TypeId::VOID,
            IntrinsicKind::Int => TypeId::INT,
            IntrinsicKind::Bool => TypeId::BOOL,
            IntrinsicKind::String => TypeId::STRING,
            IntrinsicKind::Null => TypeId::NULL,
            IntrinsicKind::Object => TypeId::OBJECT,
            IntrinsicKind::Function => TypeId::FUNCTION,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Error => "error",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Int => "int",
            IntrinsicKind::Bool => "bool",
            IntrinsicKind::String => "string",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Object => "object",
            IntrinsicKind::Function => "Func",
        }
    }

    /// Intrinsic named `name` in source, if any.
    pub fn from_name(name: &str) -> Option<IntrinsicKind> {
        IntrinsicKind::ALL
            .into_iter()
            .filter(|kind| *kind != IntrinsicKind::Error)
            .find(|kind| kind.name() == name)
    }
}

/// Structural key of a type. Equal keys intern to equal ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Intrinsic(IntrinsicKind),
    /// A declared type. For generic declarations this is the unconstructed
    /// definition (`Task<T>` declared with arity 1).
    Definition { name: Arc<str>, arity: u32 },
    /// A generic instantiation: `definition<args...>`.
    Application {
        definition: TypeId,
        args: SmallVec<[TypeId; 2]>,
    },
    /// Positional type parameter of the enclosing generic declaration.
    TypeParameter { index: u32 },
}
