use {
    crate::utils::{copyhashmap::CopyHashMap, numcell::NumCell},
    std::{
        cell::RefCell,
        collections::TryReserveError,
        rc::{Rc, Weak},
        vec,
    },
};

/// The emitting side of an observer relationship.
///
/// Listeners are held weakly. The source never keeps a listener alive and a
/// listener detaches itself when it is dropped.
pub struct EventSource<T: ?Sized> {
    listeners: Rc<Listeners<T>>,
}

struct Listeners<T: ?Sized> {
    next_id: NumCell<u64>,
    map: CopyHashMap<u64, Weak<T>>,
}

pub struct EventListener<T: ?Sized> {
    target: Weak<T>,
    link: RefCell<Option<(Weak<Listeners<T>>, u64)>>,
}

impl<T: ?Sized> Default for EventSource<T> {
    fn default() -> Self {
        Self {
            listeners: Rc::new(Listeners {
                next_id: NumCell::new(0),
                map: Default::default(),
            }),
        }
    }
}

impl<T: ?Sized> EventSource<T> {
    pub fn clear(&self) {
        self.listeners.map.clear();
    }

    /// Reserves space for one more listener so that the next `attach` does not allocate.
    pub fn reserve(&self) -> Result<(), TryReserveError> {
        self.listeners.map.reserve_one()
    }

    /// Returns the live listeners in attachment order.
    ///
    /// The set is captured up front so listeners may detach while the iterator is in use.
    pub fn iter(&self) -> EventSourceIter<T> {
        let mut listeners: Vec<_> = self
            .listeners
            .map
            .lock()
            .iter()
            .map(|(id, l)| (*id, l.clone()))
            .collect();
        listeners.sort_by_key(|(id, _)| *id);
        EventSourceIter {
            iter: listeners
                .into_iter()
                .map(|(_, l)| l)
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.map.is_empty()
    }
}

pub struct EventSourceIter<T: ?Sized> {
    iter: vec::IntoIter<Weak<T>>,
}

impl<T: ?Sized> Iterator for EventSourceIter<T> {
    type Item = Rc<T>;

    fn next(&mut self) -> Option<Self::Item> {
        for weak in self.iter.by_ref() {
            if let Some(t) = weak.upgrade() {
                return Some(t);
            }
        }
        None
    }
}

impl<T: ?Sized> EventListener<T> {
    pub fn new(t: Weak<T>) -> Self {
        Self {
            target: t,
            link: RefCell::new(None),
        }
    }

    pub fn attach(&self, source: &EventSource<T>) {
        self.detach();
        let id = source.listeners.next_id.fetch_add(1);
        source.listeners.map.set(id, self.target.clone());
        *self.link.borrow_mut() = Some((Rc::downgrade(&source.listeners), id));
    }

    pub fn detach(&self) {
        let link = self.link.borrow_mut().take();
        if let Some((listeners, id)) = link {
            if let Some(listeners) = listeners.upgrade() {
                listeners.map.remove(&id);
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        match &*self.link.borrow() {
            Some((listeners, id)) => match listeners.upgrade() {
                Some(listeners) => listeners.map.contains(id),
                None => false,
            },
            None => false,
        }
    }

    pub fn get(&self) -> Option<Rc<T>> {
        self.target.upgrade()
    }
}

impl<T: ?Sized> Drop for EventListener<T> {
    fn drop(&mut self) {
        self.detach();
    }
}
