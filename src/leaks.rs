pub use leaks::*;

macro_rules! track {
    ($client:expr, $rc:expr) => {
        $rc.tracker.register($client.id);
    };
}

#[cfg(not(any(test, feature = "rc_tracking")))]
mod leaks {
    use {crate::client::ClientId, std::marker::PhantomData};

    pub fn log_leaked() {
        // nothing
    }

    #[allow(dead_code)]
    pub fn live_objects() -> usize {
        0
    }

    pub struct Tracker<T> {
        _phantom: PhantomData<T>,
    }

    impl<T> Tracker<T> {
        pub fn register(&self, _client: ClientId) {
            // nothing
        }
    }

    impl<T> Default for Tracker<T> {
        fn default() -> Self {
            Self {
                _phantom: Default::default(),
            }
        }
    }
}

#[cfg(any(test, feature = "rc_tracking"))]
mod leaks {
    use {
        crate::client::ClientId,
        ahash::AHashMap,
        std::{any, cell::Cell, cell::RefCell, marker::PhantomData},
    };

    thread_local! {
        static LIVE: RefCell<AHashMap<&'static str, AHashMap<ClientId, usize>>> =
            RefCell::new(AHashMap::new());
    }

    /// Returns the number of registered objects of type `T` that are still alive.
    #[allow(dead_code)]
    pub fn live<T>() -> usize {
        LIVE.with_borrow(|live| match live.get(any::type_name::<T>()) {
            Some(clients) => clients.values().sum(),
            None => 0,
        })
    }

    /// Returns the number of registered objects of any type that are still alive.
    #[allow(dead_code)]
    pub fn live_objects() -> usize {
        LIVE.with_borrow(|live| live.values().flat_map(|c| c.values()).sum())
    }

    pub fn log_leaked() {
        LIVE.with_borrow(|live| {
            for (ty, clients) in live {
                for (client, n) in clients {
                    if *n > 0 {
                        log::error!("Client {} leaked {} objects of type {}", client, n, ty);
                    }
                }
            }
        })
    }

    pub struct Tracker<T> {
        client: Cell<Option<ClientId>>,
        _phantom: PhantomData<T>,
    }

    impl<T> Tracker<T> {
        pub fn register(&self, client: ClientId) {
            if self.client.replace(Some(client)).is_some() {
                return;
            }
            LIVE.with_borrow_mut(|live| {
                *live
                    .entry(any::type_name::<T>())
                    .or_default()
                    .entry(client)
                    .or_default() += 1;
            });
        }
    }

    impl<T> Default for Tracker<T> {
        fn default() -> Self {
            Self {
                client: Cell::new(None),
                _phantom: Default::default(),
            }
        }
    }

    impl<T> Drop for Tracker<T> {
        fn drop(&mut self) {
            let Some(client) = self.client.get() else {
                return;
            };
            let _ = LIVE.try_with(|live| {
                let mut live = live.borrow_mut();
                let clients = live.entry(any::type_name::<T>()).or_default();
                if let Some(n) = clients.get_mut(&client) {
                    *n -= 1;
                    if *n == 0 {
                        clients.remove(&client);
                    }
                }
            });
        }
    }
}
