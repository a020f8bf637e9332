//! Shared, type-erased handles for registered test objects.

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

/// Handle to an object registered with the bench.
///
/// The concrete type name is captured at registration time so a failed
/// downcast can name both sides. Cloning the handle shares the object, it
/// does not copy it.
#[derive(Clone)]
pub struct ObjectHandle {
    type_name: &'static str,
    object: Rc<dyn Any>,
}

impl ObjectHandle {
    /// Wrap an owned object.
    pub fn new<T: Any>(object: T) -> Self {
        Self {
            type_name: type_name::<T>(),
            object: Rc::new(object),
        }
    }

    /// Wrap an object that is already shared.
    pub fn from_rc<T: Any>(object: Rc<T>) -> Self {
        Self {
            type_name: type_name::<T>(),
            object,
        }
    }

    /// Concrete type name captured at registration time.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the stored object is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.object.is::<T>()
    }

    /// Retrieve the stored object as its concrete type.
    pub fn downcast<T: Any>(&self) -> Option<Rc<T>> {
        Rc::clone(&self.object).downcast::<T>().ok()
    }

    /// Borrow the stored object untyped.
    pub fn as_any(&self) -> &dyn Any {
        &*self.object
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectHandle").field(&self.type_name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Gateway {
        url: String,
    }

    #[test]
    fn downcasts_to_the_registered_type() {
        let handle = ObjectHandle::new(Gateway {
            url: "smtp://localhost".to_string(),
        });

        let gateway = handle.downcast::<Gateway>().unwrap();
        assert_eq!(gateway.url, "smtp://localhost");
        assert!(handle.is::<Gateway>());
    }

    #[test]
    fn rejects_a_foreign_type() {
        let handle = ObjectHandle::new(Gateway {
            url: "smtp://localhost".to_string(),
        });

        assert!(handle.downcast::<String>().is_none());
        assert!(!handle.is::<String>());
    }

    #[test]
    fn clones_share_the_object() {
        let handle = ObjectHandle::from_rc(Rc::new(Gateway {
            url: "smtp://localhost".to_string(),
        }));
        let copy = handle.clone();

        assert!(Rc::ptr_eq(
            &handle.downcast::<Gateway>().unwrap(),
            &copy.downcast::<Gateway>().unwrap()
        ));
    }

    #[test]
    fn records_the_type_name() {
        let handle = ObjectHandle::new(42u64);
        assert!(handle.type_name().ends_with("u64"));
    }
}
