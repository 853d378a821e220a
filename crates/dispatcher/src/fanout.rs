//! Fan-out to an ordered list of visitors
//!
//! A visitor list is either a single `&mut V` or a tuple of up to eight
//! `&mut V`, each `V` with its own capability. Tuple order is invocation
//! order for every record and every transition. The first failing visitor
//! stops the fan-out for that record: later visitors are not called.

use contracts::{Item, ItemType, ObjectMut, ObjectRef};

use crate::error::DispatchError;
use crate::item::{dispatch_object, dispatch_object_mut, Visit, VisitMut};
use crate::shape::Shape;
use crate::visitor::{Handler, HandlerMut};

/// Ordered visitors over read-only records
///
/// `S` collects the capability markers of the members; it is inferred.
pub trait VisitorList<S> {
    /// Number of visitors in the list
    const LEN: usize;

    /// Dispatch one record to every visitor, in order
    ///
    /// # Errors
    /// The first `UnknownType` raised; remaining visitors are skipped
    fn visit_each(&mut self, item: &Item) -> Result<(), DispatchError>;

    /// Dispatch one transition to every visitor, in order
    fn transition_each(&mut self, last: ItemType, current: ItemType);
}

/// Ordered visitors over mutable records
pub trait VisitorListMut<S> {
    const LEN: usize;

    /// # Errors
    /// The first `UnknownType` raised; remaining visitors are skipped
    fn visit_each_mut(&mut self, item: &mut Item) -> Result<(), DispatchError>;

    fn transition_each_mut(&mut self, last: ItemType, current: ItemType);
}

/// Ordered Handlers for Object views
///
/// Infallible: every Object value has a Handler route.
pub trait HandlerList {
    const LEN: usize;

    fn object_each(&mut self, object: ObjectRef<'_>);
}

/// Ordered mutable Handlers for Object views
pub trait HandlerListMut {
    const LEN: usize;

    fn object_each_mut(&mut self, object: &mut ObjectMut<'_>);
}

impl<V, S> VisitorList<S> for &mut V
where
    V: Visit<S> + ?Sized,
    S: Shape,
{
    const LEN: usize = 1;

    #[inline]
    fn visit_each(&mut self, item: &Item) -> Result<(), DispatchError> {
        Visit::<S>::visit(&mut **self, item)
    }

    #[inline]
    fn transition_each(&mut self, last: ItemType, current: ItemType) {
        Visit::<S>::transition(&mut **self, last, current);
    }
}

impl<V, S> VisitorListMut<S> for &mut V
where
    V: VisitMut<S> + ?Sized,
    S: Shape,
{
    const LEN: usize = 1;

    #[inline]
    fn visit_each_mut(&mut self, item: &mut Item) -> Result<(), DispatchError> {
        VisitMut::<S>::visit_mut(&mut **self, item)
    }

    #[inline]
    fn transition_each_mut(&mut self, last: ItemType, current: ItemType) {
        VisitMut::<S>::transition_mut(&mut **self, last, current);
    }
}

impl<H: Handler + ?Sized> HandlerList for &mut H {
    const LEN: usize = 1;

    #[inline]
    fn object_each(&mut self, object: ObjectRef<'_>) {
        dispatch_object(object, &mut **self);
    }
}

impl<H: HandlerMut + ?Sized> HandlerListMut for &mut H {
    const LEN: usize = 1;

    #[inline]
    fn object_each_mut(&mut self, object: &mut ObjectMut<'_>) {
        dispatch_object_mut(reborrow(object), &mut **self);
    }
}

/// Shorter-lived copy of a mutable Object view, so each handler in a list
/// can receive its own
fn reborrow<'a>(object: &'a mut ObjectMut<'_>) -> ObjectMut<'a> {
    match object {
        ObjectMut::Node(node) => ObjectMut::Node(node),
        ObjectMut::Way(way) => ObjectMut::Way(way),
        ObjectMut::Relation(relation) => ObjectMut::Relation(relation),
    }
}

/// Implement the list traits for one tuple arity
///
/// # Usage
/// ```ignore
/// impl_visitor_lists!((A, SA, 0), (B, SB, 1));
/// ```
macro_rules! impl_visitor_lists {
    ($(($V:ident, $S:ident, $idx:tt)),+) => {
        impl<$($V, $S),+> VisitorList<($($S,)+)> for ($(&mut $V,)+)
        where
            $($V: Visit<$S> + ?Sized, $S: Shape,)+
        {
            const LEN: usize = [$($idx),+].len();

            #[inline]
            fn visit_each(&mut self, item: &Item) -> Result<(), DispatchError> {
                $(Visit::<$S>::visit(&mut *self.$idx, item)?;)+
                Ok(())
            }

            #[inline]
            fn transition_each(&mut self, last: ItemType, current: ItemType) {
                $(Visit::<$S>::transition(&mut *self.$idx, last, current);)+
            }
        }

        impl<$($V, $S),+> VisitorListMut<($($S,)+)> for ($(&mut $V,)+)
        where
            $($V: VisitMut<$S> + ?Sized, $S: Shape,)+
        {
            const LEN: usize = [$($idx),+].len();

            #[inline]
            fn visit_each_mut(&mut self, item: &mut Item) -> Result<(), DispatchError> {
                $(VisitMut::<$S>::visit_mut(&mut *self.$idx, item)?;)+
                Ok(())
            }

            #[inline]
            fn transition_each_mut(&mut self, last: ItemType, current: ItemType) {
                $(VisitMut::<$S>::transition_mut(&mut *self.$idx, last, current);)+
            }
        }

        impl<$($V),+> HandlerList for ($(&mut $V,)+)
        where
            $($V: Handler + ?Sized,)+
        {
            const LEN: usize = [$($idx),+].len();

            #[inline]
            fn object_each(&mut self, object: ObjectRef<'_>) {
                $(dispatch_object(object, &mut *self.$idx);)+
            }
        }

        impl<$($V),+> HandlerListMut for ($(&mut $V,)+)
        where
            $($V: HandlerMut + ?Sized,)+
        {
            const LEN: usize = [$($idx),+].len();

            #[inline]
            fn object_each_mut(&mut self, object: &mut ObjectMut<'_>) {
                $(dispatch_object_mut(reborrow(object), &mut *self.$idx);)+
            }
        }
    };
}

impl_visitor_lists!((A, SA, 0));
impl_visitor_lists!((A, SA, 0), (B, SB, 1));
impl_visitor_lists!((A, SA, 0), (B, SB, 1), (C, SC, 2));
impl_visitor_lists!((A, SA, 0), (B, SB, 1), (C, SC, 2), (D, SD, 3));
impl_visitor_lists!((A, SA, 0), (B, SB, 1), (C, SC, 2), (D, SD, 3), (E, SE, 4));
impl_visitor_lists!(
    (A, SA, 0),
    (B, SB, 1),
    (C, SC, 2),
    (D, SD, 3),
    (E, SE, 4),
    (F, SF, 5)
);
impl_visitor_lists!(
    (A, SA, 0),
    (B, SB, 1),
    (C, SC, 2),
    (D, SD, 3),
    (E, SE, 4),
    (F, SF, 5),
    (G, SG, 6)
);
impl_visitor_lists!(
    (A, SA, 0),
    (B, SB, 1),
    (C, SC, 2),
    (D, SD, 3),
    (E, SE, 4),
    (F, SF, 5),
    (G, SG, 6),
    (H, SH, 7)
);
