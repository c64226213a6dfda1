// ============================================================================
// TOAST CONTAINER - Lista de toasts activos
// ============================================================================

use yew::prelude::*;

use crate::hooks::use_toast;
use crate::models::{ToastMessage, ToastType};

fn toast_icon(toast_type: ToastType) -> &'static str {
    match toast_type {
        ToastType::Info => "ℹ️",
        ToastType::Success => "✅",
        ToastType::Error => "⚠️",
    }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
    message: ToastMessage,
    on_close: Callback<()>,
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    let message = &props.message;
    let classes = classes!(
        "toast",
        message.toast_type.css_class(),
        (!message.has_description()).then_some("toast-no-description"),
    );

    html! {
        <div class={classes} role="alert">
            <span class="toast-icon">{ toast_icon(message.toast_type) }</span>
            <div class="toast-body">
                <strong>{ message.title.clone() }</strong>
                if let Some(description) = message.description.clone() {
                    <p>{ description }</p>
                }
            </div>
            <button type="button" class="toast-close" onclick={props.on_close.reform(|_| ())}>
                {"✕"}
            </button>
        </div>
    }
}

#[function_component(ToastContainer)]
pub fn toast_container() -> Html {
    let toasts = use_toast();

    html! {
        <div class="toast-container">
            { for toasts.messages.iter().map(|message| {
                let on_close = {
                    let toasts = toasts.clone();
                    let id = message.id;
                    Callback::from(move |_: ()| toasts.remove_toast(&id))
                };
                html! {
                    <Toast key={message.id.to_string()} message={message.clone()} {on_close} />
                }
            }) }
        </div>
    }
}
