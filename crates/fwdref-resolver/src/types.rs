//! Type representation for annotation values.
//!
//! Every annotation value is a `TypeId`: a handle into the `TypeInterner`.
//! The structure behind a handle is a `TypeData`, which is either concrete
//! (intrinsics, declared types, type parameters, generic applications) or
//! symbolic (placeholders, forward references, and composites that may
//! contain them).

use crate::def::DefId;
use fwdref_common::interner::Atom;

/// Interned type handle.
///
/// Equal structures intern to the same `TypeId`, so comparing two hints is
/// an integer comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// `Any`.
    pub const ANY: TypeId = TypeId(0);
    /// `None`.
    pub const NONE: TypeId = TypeId(1);
    /// `NoReturn`, also the empty union.
    pub const NEVER: TypeId = TypeId(2);
    /// `object`.
    pub const OBJECT: TypeId = TypeId(3);
    /// `bool`.
    pub const BOOL: TypeId = TypeId(4);
    /// `int`.
    pub const INT: TypeId = TypeId(5);
    /// `float`.
    pub const FLOAT: TypeId = TypeId(6);
    /// `str`.
    pub const STR: TypeId = TypeId(7);
    /// `bytes`.
    pub const BYTES: TypeId = TypeId(8);

    /// First id handed out for interned (non-intrinsic) structures.
    pub const FIRST_USER: u32 = 16;

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

/// Builtin concrete types that every registry knows about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Any,
    None,
    Never,
    Object,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
}

impl IntrinsicKind {
    pub const ALL: [IntrinsicKind; 9] = [
        IntrinsicKind::Any,
        IntrinsicKind::None,
        IntrinsicKind::Never,
        IntrinsicKind::Object,
        IntrinsicKind::Bool,
        IntrinsicKind::Int,
        IntrinsicKind::Float,
        IntrinsicKind::Str,
        IntrinsicKind::Bytes,
    ];

    pub const fn type_id(self) -> TypeId {
        match self {
            IntrinsicKind::Any => TypeId::ANY,
            IntrinsicKind::None => TypeId::NONE,
            IntrinsicKind::Never => TypeId::NEVER,
            IntrinsicKind::Object => TypeId::OBJECT,
            IntrinsicKind::Bool => TypeId::BOOL,
            IntrinsicKind::Int => TypeId::INT,
            IntrinsicKind::Float => TypeId::FLOAT,
            IntrinsicKind::Str => TypeId::STR,
            IntrinsicKind::Bytes => TypeId::BYTES,
        }
    }

    pub const fn from_type_id(id: TypeId) -> Option<IntrinsicKind> {
        match id.0 {
            0 => Some(IntrinsicKind::Any),
            1 => Some(IntrinsicKind::None),
            2 => Some(IntrinsicKind::Never),
            3 => Some(IntrinsicKind::Object),
            4 => Some(IntrinsicKind::Bool),
            5 => Some(IntrinsicKind::Int),
            6 => Some(IntrinsicKind::Float),
            7 => Some(IntrinsicKind::Str),
            8 => Some(IntrinsicKind::Bytes),
            _ => None,
        }
    }

    /// Builtin name, as it would be written in an annotation.
    pub const fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Any => "Any",
            IntrinsicKind::None => "None",
            IntrinsicKind::Never => "NoReturn",
            IntrinsicKind::Object => "object",
            IntrinsicKind::Bool => "bool",
            IntrinsicKind::Int => "int",
            IntrinsicKind::Float => "float",
            IntrinsicKind::Str => "str",
            IntrinsicKind::Bytes => "bytes",
        }
    }
}

/// Interned list of type ids (composite members, type parameters, generic args).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

impl TypeListId {
    pub const EMPTY: TypeListId = TypeListId(0);
}

/// Interned union shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnionShapeId(pub u32);

/// Interned generic application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeApplicationId(pub u32);

/// Structure of one annotation value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// Builtin concrete type.
    Intrinsic(IntrinsicKind),
    /// A declared class or function.
    Declared(DefId),
    /// Bare textual name of a type that did not exist yet.
    Placeholder(Atom),
    /// Text explicitly marked as a deferred reference.
    ForwardRef(Atom),
    /// Union-like composite.
    Union(UnionShapeId),
    /// Type variable (`~T`).
    TypeParam(Atom),
    /// Generic container such as `List[X]`. Its arguments are not resolved.
    Application(TypeApplicationId),
}

/// Metadata and members of a union-like composite.
///
/// Resolution only ever replaces `members`; the other fields identify the
/// composite and are carried over to the rebuilt shape untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnionShape {
    /// Generic origin (`Union`).
    pub origin: Atom,
    /// Display name, e.g. `Optional`; `None` for a plain union.
    pub name: Option<Atom>,
    /// Whether the composite may be instantiated.
    pub inst: bool,
    /// Free type variables of the composite, kept for later substitution.
    pub parameters: TypeListId,
    /// Member types, in declaration order.
    pub members: TypeListId,
}

/// A generic container applied to arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeApplication {
    pub base: Atom,
    pub args: TypeListId,
}
