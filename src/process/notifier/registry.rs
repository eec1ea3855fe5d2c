use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Error;

/// Subscribers of one kind, in registration order.
///
/// Fan-out runs under the read lock, so registrations wait for in-flight notifications and a
/// notification never observes a half registered subscriber.
pub struct Registry<T: ?Sized> {
    subscribers: RwLock<Vec<Arc<T>>>,
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }
}

impl<T: ?Sized> Registry<T> {
    pub fn register(&self, subscriber: Arc<T>) {
        self.subscribers.write().push(subscriber);
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }

    /// Calls `f` for every subscriber
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        for subscriber in self.subscribers.read().iter() {
            f(subscriber.as_ref());
        }
    }

    /// Calls `f` for every subscriber, stopping at the first error
    pub fn try_for_each<F>(&self, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&T) -> Result<(), Error>,
    {
        let subscribers = self.subscribers.read();

        for subscriber in subscribers.iter() {
            f(subscriber.as_ref())?;
        }

        Ok(())
    }
}
