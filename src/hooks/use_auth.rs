// ============================================================================
// AUTH CONTEXT - Compartir la sesión entre componentes
// ============================================================================
// El provider crea el SessionManager una sola vez y restaura la sesión
// guardada al montarse; hasta entonces el estado es `Loading`.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::models::User;
use crate::services::ApiClient;
use crate::state::{SessionManager, SessionState};
use crate::utils::storage::BrowserStorage;

pub type AppSessionManager = SessionManager<ApiClient, BrowserStorage>;

#[derive(Clone)]
pub struct AuthContext {
    manager: Rc<AppSessionManager>,
    pub state: Rc<SessionState>,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.manager, &other.manager) && self.state == other.state
    }
}

impl AuthContext {
    pub fn manager(&self) -> Rc<AppSessionManager> {
        self.manager.clone()
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    pub fn sign_out(&self) {
        self.manager.sign_out();
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let manager = use_memo((), |_| {
        SessionManager::new(ApiClient::new(), BrowserStorage::new())
    });
    let state = use_state(|| Rc::new(SessionState::Loading));

    {
        let manager = manager.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            let subscription = manager.subscribe(move |session| {
                state.set(Rc::new(session.clone()));
            });
            manager.restore();
            move || manager.unsubscribe(subscription)
        });
    }

    let context = AuthContext {
        manager,
        state: (*state).clone(),
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Acceso a la sesión. Solo dentro de `AuthProvider`.
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("use_auth must be used within an AuthProvider")
}
