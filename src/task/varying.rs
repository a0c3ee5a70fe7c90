//! Typed ports carrying data between jobs
//!
//! A [`Varying`] holds exactly one value of some type behind a shared handle.
//! Cloning a `Varying` clones the handle, not the value, so a producer job
//! and any number of consumer jobs observe the same payload.

use crate::error::{TaskError, TaskResult};
use crate::task::job::JobInner;
use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, Mutex, RwLock, RwLockReadGuard,
    RwLockWriteGuard,
};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::{Arc, Weak};

struct Payload {
    type_id: TypeId,
    type_name: &'static str,
    data: RwLock<Box<dyn Any + Send + Sync>>,
    /// Jobs reading this port. Informational, never used for scheduling.
    consumers: Mutex<Vec<Weak<JobInner>>>,
}

impl Payload {
    fn check<T: Any>(&self) -> TaskResult<()> {
        if self.type_id == TypeId::of::<T>() {
            Ok(())
        } else {
            Err(TaskError::VaryingTypeMismatch {
                expected: std::any::type_name::<T>(),
                found: self.type_name,
            })
        }
    }
}

/// A type-erased, shareable single-value port
#[derive(Clone, Default)]
pub struct Varying {
    payload: Option<Arc<Payload>>,
}

impl Varying {
    /// Create a port holding `value`
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            payload: Some(Arc::new(Payload {
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
                data: RwLock::new(Box::new(value)),
                consumers: Mutex::new(Vec::new()),
            })),
        }
    }

    /// Create a port with no value. It must be assigned before it is read.
    pub fn empty() -> Self {
        Self { payload: None }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// Whether the port holds a value of type `T`
    pub fn is<T: Any>(&self) -> bool {
        self.payload
            .as_ref()
            .is_some_and(|p| p.type_id == TypeId::of::<T>())
    }

    /// Name of the payload type, for diagnostics
    pub fn type_name(&self) -> Option<&'static str> {
        self.payload.as_ref().map(|p| p.type_name)
    }

    /// Whether both ports share the same payload
    pub fn ptr_eq(&self, other: &Varying) -> bool {
        match (&self.payload, &other.payload) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Read the value as `T`.
    ///
    /// # Panics
    /// Panics if the port is empty or holds another type. Both are wiring
    /// bugs; use [`Varying::try_get`] to check instead.
    pub fn get<T: Any + Send + Sync>(&self) -> MappedRwLockReadGuard<'_, T> {
        match self.try_get::<T>() {
            Ok(guard) => guard,
            Err(err) => panic!("invalid port read: {err}"),
        }
    }

    /// Mutable access to the value as `T`.
    ///
    /// # Panics
    /// Panics if the port is empty or holds another type.
    pub fn edit<T: Any + Send + Sync>(&self) -> MappedRwLockWriteGuard<'_, T> {
        match self.try_edit::<T>() {
            Ok(guard) => guard,
            Err(err) => panic!("invalid port write: {err}"),
        }
    }

    pub fn try_get<T: Any + Send + Sync>(&self) -> TaskResult<MappedRwLockReadGuard<'_, T>> {
        let payload = self.payload.as_ref().ok_or(TaskError::EmptyVarying)?;
        payload.check::<T>()?;
        RwLockReadGuard::try_map(payload.data.read(), |data| (**data).downcast_ref::<T>())
            .map_err(|_| TaskError::VaryingTypeMismatch {
                expected: std::any::type_name::<T>(),
                found: payload.type_name,
            })
    }

    pub fn try_edit<T: Any + Send + Sync>(&self) -> TaskResult<MappedRwLockWriteGuard<'_, T>> {
        let payload = self.payload.as_ref().ok_or(TaskError::EmptyVarying)?;
        payload.check::<T>()?;
        RwLockWriteGuard::try_map(payload.data.write(), |data| (**data).downcast_mut::<T>())
            .map_err(|_| TaskError::VaryingTypeMismatch {
                expected: std::any::type_name::<T>(),
                found: payload.type_name,
            })
    }

    /// Assign a value.
    ///
    /// An empty port gets a fresh payload; clones taken while it was empty
    /// stay empty. A filled port is overwritten in place and must keep its type.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) -> TaskResult<()> {
        if self.payload.is_none() {
            *self = Varying::new(value);
            return Ok(());
        }
        *self.try_edit::<T>()? = value;
        Ok(())
    }

    pub(crate) fn add_consumer(&self, job: &Arc<JobInner>) {
        if let Some(payload) = &self.payload {
            let mut consumers = payload.consumers.lock();
            consumers.retain(|consumer| consumer.strong_count() > 0);
            consumers.push(Arc::downgrade(job));
        }
    }

    /// Names of the live jobs reading this port
    pub fn consumers(&self) -> Vec<String> {
        let Some(payload) = &self.payload else {
            return Vec::new();
        };
        let mut consumers = payload.consumers.lock();
        consumers.retain(|job| job.strong_count() > 0);
        consumers
            .iter()
            .filter_map(Weak::upgrade)
            .map(|job| job.name.clone())
            .collect()
    }
}

impl fmt::Debug for Varying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name() {
            Some(name) => write!(f, "Varying<{name}>"),
            None => f.write_str("Varying(empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{InputJobBody, Job, RenderContext, SceneContext};

    #[test]
    fn test_read_and_edit() {
        let port = Varying::new(vec![1u32, 2, 3]);
        assert!(port.is::<Vec<u32>>());
        assert_eq!(port.get::<Vec<u32>>().len(), 3);

        port.edit::<Vec<u32>>().push(4);
        assert_eq!(*port.get::<Vec<u32>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_clone_shares_payload() {
        let producer = Varying::new(0u64);
        let consumer = producer.clone();
        assert!(producer.ptr_eq(&consumer));

        *producer.edit::<u64>() = 42;
        assert_eq!(*consumer.get::<u64>(), 42);
    }

    #[test]
    fn test_empty_port() {
        let port = Varying::default();
        assert!(port.is_empty());
        assert_eq!(port.type_name(), None);
        assert!(!port.is::<u32>());
        assert!(matches!(port.try_get::<u32>(), Err(TaskError::EmptyVarying)));
        assert!(!port.ptr_eq(&Varying::empty()));
    }

    #[test]
    fn test_mismatched_read_is_reported() {
        let port = Varying::new(1.5f32);
        let err = port.try_get::<u32>().err();
        assert_eq!(
            err,
            Some(TaskError::VaryingTypeMismatch {
                expected: "u32",
                found: "f32",
            })
        );
    }

    #[test]
    #[should_panic(expected = "invalid port read")]
    fn test_mismatched_get_panics() {
        let port = Varying::new(String::from("depth"));
        let _ = port.get::<u32>();
    }

    #[test]
    fn test_set() {
        let mut port = Varying::empty();
        port.set(7i32).unwrap();
        assert_eq!(*port.get::<i32>(), 7);

        let reader = port.clone();
        port.set(9i32).unwrap();
        assert_eq!(*reader.get::<i32>(), 9);

        assert!(port.set(1.0f64).is_err());
    }

    struct Sink;

    impl InputJobBody for Sink {
        type Input = u32;

        fn run(&mut self, _scene: &SceneContext, _render: &mut RenderContext, _input: &u32) {}
    }

    #[test]
    fn test_rewiring_prunes_dropped_consumers() {
        let port = Varying::new(0u32);
        for _ in 0..16 {
            drop(Job::with_input("sink", Sink, &port).unwrap());
        }
        let kept = Job::with_input("kept", Sink, &port).unwrap();

        let registered = port.payload.as_ref().map(|p| p.consumers.lock().len());
        assert_eq!(registered, Some(1));
        assert_eq!(port.consumers(), vec!["kept".to_string()]);
        drop(kept);
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Varying::new(1u8)), "Varying<u8>");
        assert_eq!(format!("{:?}", Varying::empty()), "Varying(empty)");
    }
}
