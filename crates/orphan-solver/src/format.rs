//! Display strings for types.

use crate::intern::TypeInterner;
use crate::types::{TypeId, TypeKey};

pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        TypeFormatter { interner }
    }

    pub fn format(&self, ty: TypeId) -> String {
        let mut out = String::new();
        self.write(&mut out, ty);
        out
    }

    fn write(&self, out: &mut String, ty: TypeId) {
        match self.interner.lookup(ty) {
            Some(TypeKey::Intrinsic(kind)) => out.push_str(kind.name()),
            Some(TypeKey::Definition { name, arity }) => {
                out.push_str(&name);
                if arity > 0 {
                    out.push('<');
                    out.push_str(&",".repeat(arity as usize - 1));
                    out.push('>');
                }
            }
            Some(TypeKey::Application { definition, args }) => {
                match self.interner.lookup(definition) {
                    Some(TypeKey::Definition { name, .. }) => out.push_str(&name),
                    _ => out.push('?'),
                }
                out.push('<');
                for (i, &arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write(out, arg);
                }
                out.push('>');
            }
            Some(TypeKey::TypeParameter { index }) => {
                out.push('T');
                out.push_str(&index.to_string());
            }
            None => out.push_str("<unknown>"),
        }
    }
}
