// ============================================================================
// TOAST STATE - Centro de notificaciones
// ============================================================================
// Lista ordenada de toasts activos (el más nuevo al final).
// `info`/`success` expiran solos; `error` espera a que el usuario lo cierre.
// Cada toast con expiración tiene su temporizador en `timers`; quitar el
// toast suelta el handle y con él cancela el temporizador.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::models::{ToastId, ToastMessage, ToastSpec};
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::state::timers::TimerScheduler;

struct Shared<S: TimerScheduler> {
    toasts: ReactiveState<Vec<ToastMessage>>,
    timers: RefCell<HashMap<ToastId, S::Handle>>,
    scheduler: S,
    duration_ms: u32,
}

impl<S: TimerScheduler> Shared<S> {
    fn remove(&self, id: &ToastId) -> bool {
        // Soltar el handle fuera del borrow: su Drop puede tocar el scheduler
        let timer = self.timers.borrow_mut().remove(id);
        drop(timer);

        self.toasts.update_if(|toasts| {
            let before = toasts.len();
            toasts.retain(|toast| toast.id != *id);
            toasts.len() != before
        })
    }
}

/// Dueño único de los toasts. Los clones comparten el mismo estado.
pub struct NotificationCenter<S: TimerScheduler + 'static> {
    shared: Rc<Shared<S>>,
}

impl<S: TimerScheduler + 'static> NotificationCenter<S> {
    pub fn new(scheduler: S, duration_ms: u32) -> Self {
        Self {
            shared: Rc::new(Shared {
                toasts: ReactiveState::new(Vec::new()),
                timers: RefCell::new(HashMap::new()),
                scheduler,
                duration_ms,
            }),
        }
    }

    /// Añade un toast al final de la lista y devuelve su id
    pub fn add_toast(&self, spec: ToastSpec) -> ToastId {
        debug_assert!(!spec.title.trim().is_empty(), "toast title is required");

        let message = ToastMessage::from_spec(spec);
        let id = message.id;
        let expires = message.toast_type.auto_expires();
        log::debug!("🔔 [TOAST] {:?}: {}", message.toast_type, message.title);

        if expires {
            let weak: Weak<Shared<S>> = Rc::downgrade(&self.shared);
            let handle = self.shared.scheduler.schedule(
                self.shared.duration_ms,
                Box::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.remove(&id);
                    }
                }),
            );
            self.shared.timers.borrow_mut().insert(id, handle);
        }

        self.shared.toasts.update(|toasts| toasts.push(message));
        id
    }

    /// Quita el toast si sigue activo; si no, no hace nada
    pub fn remove_toast(&self, id: &ToastId) {
        if !self.shared.remove(id) {
            log::debug!("🔕 [TOAST] {} ya no estaba activo", id);
        }
    }

    /// Copia de los toasts activos en orden de inserción
    pub fn messages(&self) -> Vec<ToastMessage> {
        self.shared.toasts.get()
    }

    pub fn len(&self) -> usize {
        self.shared.toasts.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Temporizadores de expiración aún pendientes
    pub fn pending_timers(&self) -> usize {
        self.shared.timers.borrow().len()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Vec<ToastMessage>) + 'static,
    {
        self.shared.toasts.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.shared.toasts.unsubscribe(id);
    }
}

impl<S: TimerScheduler + 'static> Clone for NotificationCenter<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S: TimerScheduler + 'static> PartialEq for NotificationCenter<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}
