//! # Dispatcher
//!
//! Typed record dispatch.
//!
//! Responsible for:
//! - Routing each record to its visitors by runtime tag
//! - Signalling group boundaries (`before_*` / `after_*`) to Handlers
//! - Fan-out to an ordered list of visitors, stopping at the first failure
//!
//! Two visitor conventions are supported: Callables receive a shape view of
//! every routed record, Handlers receive named per-entity calls plus
//! lifecycle hooks. Which one applies is decided per visitor type at compile
//! time. Dispatch never allocates and never retains a record.

pub mod apply;
pub mod error;
pub mod fanout;
pub mod handlers;
pub mod item;
pub mod shape;
pub mod transition;
pub mod visitor;

pub use apply::{
    apply, apply_iter, apply_iter_mut, apply_mut, apply_source, dispatch_item, dispatch_item_mut,
    dispatch_objects, dispatch_objects_mut, dispatch_transition, Traversal, TraversalSummary,
};
pub use contracts::{Buffer, Item, ItemMut, ItemRef, ItemSource, ItemType, ObjectMut, ObjectRef};
pub use error::DispatchError;
pub use fanout::{HandlerList, HandlerListMut, VisitorList, VisitorListMut};
pub use handlers::{CountHandler, LogHandler};
pub use item::{dispatch_object, dispatch_object_mut, Visit, VisitMut};
pub use shape::{
    capability, capability_mut, capability_of, capability_of_mut, CallableMutShape,
    CallableShape, Capability, HandlerMutShape, HandlerShape, Shape,
};
pub use transition::dispatch_hooks;
pub use visitor::{Callable, CallableMut, Handler, HandlerMut, Lifecycle};
