//! Once-only capability loading
//!
//! A [`LazyCapability`] holds a loader and a `OnceLock` slot. The first
//! caller runs the loader; concurrent first callers block until it finishes.
//! From then on the slot is either Ready or Unavailable, and a failed load is
//! never retried for the lifetime of the slot.

use super::CapabilityResult;
use crate::errors::CapabilityError;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

type Loader<T> = Box<dyn Fn() -> CapabilityResult<Arc<T>> + Send + Sync>;

/// Observable state of a capability slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityStatus {
    /// A loader is registered but has not run yet
    Pending,
    Ready,
    /// Never configured, or the loader failed
    Unavailable,
}

/// Lazily-initialized, shared, read-only capability handle
pub struct LazyCapability<T: ?Sized> {
    name: &'static str,
    loader: Option<Loader<T>>,
    slot: OnceLock<Option<Arc<T>>>,
}

impl<T: ?Sized> LazyCapability<T> {
    /// A slot with nothing configured; always unavailable.
    pub fn absent(name: &'static str) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(None);
        Self {
            name,
            loader: None,
            slot,
        }
    }

    /// A slot whose capability is already constructed.
    pub fn ready(name: &'static str, capability: Arc<T>) -> Self {
        let slot = OnceLock::new();
        let _ = slot.set(Some(capability));
        Self {
            name,
            loader: None,
            slot,
        }
    }

    /// A slot that runs `loader` on first use.
    pub fn lazy<F>(name: &'static str, loader: F) -> Self
    where
        F: Fn() -> CapabilityResult<Arc<T>> + Send + Sync + 'static,
    {
        Self {
            name,
            loader: Some(Box::new(loader)),
            slot: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn status(&self) -> CapabilityStatus {
        match self.slot.get() {
            None => CapabilityStatus::Pending,
            Some(Some(_)) => CapabilityStatus::Ready,
            Some(None) => CapabilityStatus::Unavailable,
        }
    }

    /// The capability, loading it on first use.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.get_or_init(|| self.load()).clone()
    }

    /// Like [`get`](Self::get) but as a `Result` for pattern matching.
    pub fn try_get(&self) -> CapabilityResult<Arc<T>> {
        self.get().ok_or_else(|| CapabilityError::Unavailable {
            name: self.name.to_string(),
        })
    }

    fn load(&self) -> Option<Arc<T>> {
        let Some(loader) = &self.loader else {
            debug!(capability = self.name, "no loader registered");
            return None;
        };

        match loader() {
            Ok(capability) => {
                info!(capability = self.name, "capability loaded");
                Some(capability)
            }
            Err(e) => {
                warn!(
                    capability = self.name,
                    error = %e,
                    "capability failed to load; fallback will be used for the process lifetime"
                );
                None
            }
        }
    }
}

impl<T: ?Sized> fmt::Debug for LazyCapability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyCapability")
            .field("name", &self.name)
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    #[test]
    fn test_absent_is_unavailable() {
        let cap: LazyCapability<dyn Greeter> = LazyCapability::absent("greeter");
        assert_eq!(cap.status(), CapabilityStatus::Unavailable);
        assert!(cap.get().is_none());
        assert!(matches!(
            cap.try_get(),
            Err(CapabilityError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_ready_is_available_immediately() {
        let cap: LazyCapability<dyn Greeter> = LazyCapability::ready("greeter", Arc::new(Hello));
        assert_eq!(cap.status(), CapabilityStatus::Ready);
        assert_eq!(cap.get().unwrap().greet(), "hello");
    }

    #[test]
    fn test_loader_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cap: LazyCapability<dyn Greeter> = LazyCapability::lazy("greeter", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Hello) as Arc<dyn Greeter>)
        });

        assert_eq!(cap.status(), CapabilityStatus::Pending);
        for _ in 0..5 {
            assert!(cap.get().is_some());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cap.status(), CapabilityStatus::Ready);
    }

    #[test]
    fn test_failed_load_is_never_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cap: LazyCapability<dyn Greeter> = LazyCapability::lazy("greeter", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(CapabilityError::load_failed("greeter", "weights missing"))
        });

        assert!(cap.get().is_none());
        assert!(cap.get().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cap.status(), CapabilityStatus::Unavailable);
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cap: Arc<LazyCapability<dyn Greeter>> = Arc::new(LazyCapability::lazy("greeter", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(20));
            Ok(Arc::new(Hello) as Arc<dyn Greeter>)
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cap = Arc::clone(&cap);
                thread::spawn(move || cap.get().map(|g| g.greet()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("hello"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
