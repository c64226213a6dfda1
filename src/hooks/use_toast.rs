// ============================================================================
// TOAST CONTEXT - Compartir el centro de notificaciones entre componentes
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::config::CONFIG;
use crate::models::{ToastId, ToastMessage, ToastSpec};
use crate::state::{GlooScheduler, NotificationCenter};

pub type AppNotificationCenter = NotificationCenter<GlooScheduler>;

/// Valor del contexto: el centro + la última copia de los toasts
#[derive(Clone)]
pub struct ToastContext {
    center: Rc<AppNotificationCenter>,
    pub messages: Rc<Vec<ToastMessage>>,
}

impl PartialEq for ToastContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.center, &other.center) && self.messages == other.messages
    }
}

impl ToastContext {
    pub fn add_toast(&self, spec: ToastSpec) -> ToastId {
        self.center.add_toast(spec)
    }

    pub fn remove_toast(&self, id: &ToastId) {
        self.center.remove_toast(id);
    }

    pub fn center(&self) -> Rc<AppNotificationCenter> {
        self.center.clone()
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

/// Provider que envuelve la app y es dueño de los toasts
#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let center = use_memo((), |_| {
        NotificationCenter::new(GlooScheduler, CONFIG.toast_duration_ms)
    });
    let messages = use_state(|| Rc::new(Vec::<ToastMessage>::new()));

    {
        let center = center.clone();
        let messages = messages.clone();
        use_effect_with((), move |_| {
            let subscription = center.subscribe(move |toasts| {
                messages.set(Rc::new(toasts.clone()));
            });
            move || center.unsubscribe(subscription)
        });
    }

    let context = ToastContext {
        center,
        messages: (*messages).clone(),
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

/// Acceso al centro de notificaciones. Solo dentro de `ToastProvider`.
#[hook]
pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("use_toast must be used within a ToastProvider")
}
