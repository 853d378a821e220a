//! Capability detection
//!
//! Each visitor type reaches the dispatchers through exactly one shape
//! marker. The marker is a type parameter of [`Visit`](crate::Visit) /
//! [`VisitMut`](crate::VisitMut), so it is resolved by trait selection when
//! the visitor is first dispatched to and costs nothing at run time. A type
//! that implements two capability traits makes the marker ambiguous and the
//! call site fails to compile.

use crate::{Visit, VisitMut};

mod sealed {
    pub trait Sealed {}
}

/// Visitor calling convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Callable,
    Handler,
}

/// Type-level capability marker
pub trait Shape: sealed::Sealed + 'static {
    const CAPABILITY: Capability;

    /// Receives mutable record references
    const MUTABLE: bool;

    const IS_HANDLER: bool = matches!(Self::CAPABILITY, Capability::Handler);
}

/// Marker for [`Callable`](crate::Callable) visitors
#[derive(Debug)]
pub enum CallableShape {}

/// Marker for [`CallableMut`](crate::CallableMut) visitors
#[derive(Debug)]
pub enum CallableMutShape {}

/// Marker for [`Handler`](crate::Handler) visitors
#[derive(Debug)]
pub enum HandlerShape {}

/// Marker for [`HandlerMut`](crate::HandlerMut) visitors
#[derive(Debug)]
pub enum HandlerMutShape {}

macro_rules! impl_shape {
    ($($shape:ident => ($capability:ident, $mutable:expr)),* $(,)?) => {
        $(
            impl sealed::Sealed for $shape {}

            impl Shape for $shape {
                const CAPABILITY: Capability = Capability::$capability;
                const MUTABLE: bool = $mutable;
            }
        )*
    };
}

impl_shape!(
    CallableShape => (Callable, false),
    CallableMutShape => (Callable, true),
    HandlerShape => (Handler, false),
    HandlerMutShape => (Handler, true),
);

/// Capability a read-only visitor type is dispatched with
pub const fn capability<V, S>() -> Capability
where
    V: Visit<S> + ?Sized,
    S: Shape,
{
    S::CAPABILITY
}

/// Capability a visitor type is dispatched with on a mutable stream
pub const fn capability_mut<V, S>() -> Capability
where
    V: VisitMut<S> + ?Sized,
    S: Shape,
{
    S::CAPABILITY
}

/// Capability of a visitor value whose type cannot be named (closures)
pub fn capability_of<V, S>(_visitor: &V) -> Capability
where
    V: Visit<S> + ?Sized,
    S: Shape,
{
    S::CAPABILITY
}

/// Mutable-stream capability of a visitor value whose type cannot be named
pub fn capability_of_mut<V, S>(_visitor: &V) -> Capability
where
    V: VisitMut<S> + ?Sized,
    S: Shape,
{
    S::CAPABILITY
}
