// ============================================================================
// APP - Componente raíz: providers + página según el estado de la sesión
// ============================================================================

use yew::prelude::*;

use crate::components::{Profile, SignIn, ToastContainer};
use crate::hooks::{use_auth, AuthProvider, ToastProvider};
use crate::state::SessionState;

#[function_component(Pages)]
fn pages() -> Html {
    let auth = use_auth();

    match auth.state.as_ref() {
        SessionState::Loading => html! { <div class="loading">{"Loading..."}</div> },
        SessionState::Unauthenticated => html! { <SignIn /> },
        SessionState::Authenticated(_) => html! { <Profile /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <AuthProvider>
                <Pages />
            </AuthProvider>
            <ToastContainer />
        </ToastProvider>
    }
}
