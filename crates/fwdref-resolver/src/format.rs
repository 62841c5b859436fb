//! Human-readable rendering of hints, for logs and test assertions.

use crate::def::DeclarationStore;
use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId};
use fwdref_common::limits::MAX_HINT_DEPTH;

/// Renders hints the way they would be written in an annotation:
/// `int`, `'Edge'`, `ForwardRef('Edge')`, `Union[Node, int]`,
/// `Optional[Node]`, `List[str]`, `~T`.
pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
    declarations: Option<&'a DeclarationStore>,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        Self {
            interner,
            declarations: None,
        }
    }

    /// Use declaration names instead of `#id` for declared types.
    pub fn with_declarations(mut self, declarations: &'a DeclarationStore) -> Self {
        self.declarations = Some(declarations);
        self
    }

    pub fn format(&self, hint: TypeId) -> String {
        let mut out = String::new();
        self.write(&mut out, hint, 0);
        out
    }

    fn write(&self, out: &mut String, hint: TypeId, depth: u32) {
        if depth > MAX_HINT_DEPTH {
            out.push_str("...");
            return;
        }
        let Some(data) = self.interner.lookup(hint) else {
            out.push_str("<unknown>");
            return;
        };

        match data {
            TypeData::Intrinsic(kind) => out.push_str(kind.name()),
            TypeData::Declared(def_id) => {
                match self.declarations.and_then(|store| store.name(def_id)) {
                    Some(name) if !name.is_none() => {
                        out.push_str(&self.interner.resolve_atom_ref(name));
                    }
                    _ => out.push_str(&def_id.to_string()),
                }
            }
            TypeData::Placeholder(name) => {
                out.push('\'');
                out.push_str(&self.interner.resolve_atom_ref(name));
                out.push('\'');
            }
            TypeData::ForwardRef(name) => {
                out.push_str("ForwardRef('");
                out.push_str(&self.interner.resolve_atom_ref(name));
                out.push_str("')");
            }
            TypeData::TypeParam(name) => {
                out.push('~');
                out.push_str(&self.interner.resolve_atom_ref(name));
            }
            TypeData::Union(shape_id) => {
                let Some(shape) = self.interner.union_shape(shape_id) else {
                    out.push_str("<unknown>");
                    return;
                };
                let members = self.interner.type_list(shape.members);
                let label = shape.name.unwrap_or(shape.origin);
                let label = self.interner.resolve_atom_ref(label);

                // Optional[X] is shown without its implicit None member.
                let shown: Vec<TypeId> = if &*label == "Optional" && members.len() == 2 {
                    members.iter().copied().filter(|&m| m != TypeId::NONE).collect()
                } else {
                    members.to_vec()
                };
                out.push_str(&label);
                self.write_list(out, &shown, depth);
            }
            TypeData::Application(app_id) => {
                let Some(app) = self.interner.type_application(app_id) else {
                    out.push_str("<unknown>");
                    return;
                };
                out.push_str(&self.interner.resolve_atom_ref(app.base));
                let args = self.interner.type_list(app.args);
                self.write_list(out, &args, depth);
            }
        }
    }

    fn write_list(&self, out: &mut String, items: &[TypeId], depth: u32) {
        out.push('[');
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write(out, item, depth + 1);
        }
        out.push(']');
    }
}
