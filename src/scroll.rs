//! Viewport scroll offset as an observable value.
//!
//! [`ScrollTracker`] is the only writer; views subscribe to the shared
//! [`ScrollSignal`] and read the latest sample.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, Window};

use crate::error::SiteError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(f64)>;

#[derive(Default)]
pub struct ScrollSignal {
    value: Cell<f64>,
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest published offset, 0.0 before the first sample.
    pub fn get(&self) -> f64 {
        self.value.get()
    }

    pub fn subscribe(&self, subscriber: impl Fn(f64) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub(crate) fn publish(&self, scroll_y: f64) {
        self.value.set(scroll_y);
        // Snapshot so a subscriber may (un)subscribe while being notified.
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, sub)| Rc::clone(sub))
            .collect();
        for sub in subscribers {
            sub(scroll_y);
        }
    }
}

fn read_scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Passive `scroll` listener feeding a [`ScrollSignal`].
///
/// Samples once on attach so readers start with the real offset. The listener
/// is removed by [`ScrollTracker::detach`] or on drop.
pub struct ScrollTracker {
    window: Window,
    signal: Rc<ScrollSignal>,
    handler: Option<Closure<dyn FnMut(Event)>>,
}

impl ScrollTracker {
    pub fn attach(window: &Window, signal: Rc<ScrollSignal>) -> Result<Self, SiteError> {
        let win = window.clone();
        let signal_cb = Rc::clone(&signal);
        let handler = Closure::wrap(Box::new(move |_event: Event| {
            signal_cb.publish(read_scroll_y(&win));
        }) as Box<dyn FnMut(_)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            handler.as_ref().unchecked_ref(),
            &options,
        )?;

        signal.publish(read_scroll_y(window));

        Ok(Self {
            window: window.clone(),
            signal,
            handler: Some(handler),
        })
    }

    pub fn signal(&self) -> &Rc<ScrollSignal> {
        &self.signal
    }

    pub fn is_attached(&self) -> bool {
        self.handler.is_some()
    }

    pub fn detach(&mut self) {
        let Some(handler) = self.handler.take() else {
            return;
        };
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("scroll", handler.as_ref().unchecked_ref())
        {
            web_sys::console::warn_1(&err);
        }
    }
}

impl Drop for ScrollTracker {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_to_every_subscriber() {
        let signal = ScrollSignal::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = Rc::clone(&seen);
        signal.subscribe(move |y| a.borrow_mut().push(("a", y)));
        let b = Rc::clone(&seen);
        signal.subscribe(move |y| b.borrow_mut().push(("b", y)));

        signal.publish(120.0);
        assert_eq!(signal.get(), 120.0);
        assert_eq!(*seen.borrow(), vec![("a", 120.0), ("b", 120.0)]);
    }

    #[test]
    fn unsubscribed_readers_stop_hearing() {
        let signal = ScrollSignal::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = signal.subscribe(move |_| c.set(c.get() + 1));

        signal.publish(1.0);
        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.publish(2.0);

        assert_eq!(count.get(), 1);
        assert_eq!(signal.subscriber_count(), 0);
        assert_eq!(signal.get(), 2.0);
    }

    #[test]
    fn subscriber_may_unsubscribe_itself() {
        let signal = Rc::new(ScrollSignal::new());
        let slot: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let sig = Rc::clone(&signal);
        let own = Rc::clone(&slot);
        let id = signal.subscribe(move |_| {
            if let Some(id) = own.get() {
                sig.unsubscribe(id);
            }
        });
        slot.set(Some(id));

        signal.publish(5.0);
        assert_eq!(signal.subscriber_count(), 0);
    }
}
