// ============================================================================
// APP STATE - Global application state
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::auth::OperatorAuth;
use crate::models::event::{NexusEvent, Participant};

/// Global state of the check-in screen. Cloning shares the underlying
/// cells; mutations go through the setters so subscribers get notified.
#[derive(Clone)]
pub struct AppState {
    pub operator: Rc<RefCell<Option<OperatorAuth>>>,
    pub event: Rc<RefCell<Option<NexusEvent>>>,
    pub roster: Rc<RefCell<Vec<Participant>>>,
    pub loading: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,

    // Reactivity: callbacks notified on state changes
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            operator: Rc::new(RefCell::new(None)),
            event: Rc::new(RefCell::new(None)),
            roster: Rc::new(RefCell::new(Vec::new())),
            loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_operator(&self, operator: Option<OperatorAuth>) {
        *self.operator.borrow_mut() = operator;
        self.notify_subscribers();
    }

    pub fn set_event(&self, event: Option<NexusEvent>) {
        *self.event.borrow_mut() = event;
        self.notify_subscribers();
    }

    pub fn set_roster(&self, roster: Vec<Participant>) {
        *self.roster.borrow_mut() = roster;
        self.notify_subscribers();
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
        self.notify_subscribers();
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
        self.notify_subscribers();
    }

    /// Number of roster rows already checked in
    pub fn checked_in_count(&self) -> usize {
        self.roster.borrow().iter().filter(|p| p.checked_in).count()
    }

    /// Subscribe to state changes
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notify all subscribers
    pub fn notify_subscribers(&self) {
        for callback in self.change_subscribers.borrow().iter() {
            callback();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
