//! # Resource Trait
//!
//! The engine handles instances of many unrelated domain types. They travel through it as
//! `Box<dyn Resource>` and are recovered by the code that knows the concrete type (schema
//! closures, relationship repositories, the caller) with a checked downcast.
//!
//! Every `Send + Sync + Debug + 'static` type is a [`Resource`]; nothing needs to be derived.
//!
//! Note that `Box<dyn Resource>` is itself a `Resource`. When handing a boxed instance to code
//! expecting `&mut dyn Resource`, reborrow the contents (`&mut *boxed`) rather than the box.

use std::any::Any;
use std::fmt::Debug;

/// A domain object the upsert engine can construct and bind.
pub trait Resource: Any + Send + Sync + Debug + 'static {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Send + Sync + Debug> Resource for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn Resource {
    pub fn is<T: Resource>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Resource>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Resource>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Unboxes the instance as `T`, or `None` when it is some other type.
    pub fn downcast<T: Resource>(self: Box<Self>) -> Option<T> {
        self.into_any().downcast::<T>().ok().map(|boxed| *boxed)
    }
}

/// Short type name used in log fields (e.g. `Project` instead of `resource_upsert::model::Project`).
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
