// ============================================================================
// AUTH STATE - Sesión del usuario (token + usuario) sincronizada con storage
// ============================================================================
// Única fuente de verdad de "quién está logueado". Cada operación que cambia
// el estado escribe localStorage en el mismo paso que la memoria.
// ============================================================================

use std::cell::Cell;

use crate::error::{AuthError, StorageError};
use crate::models::{SignInRequest, User};
use crate::services::AuthBackend;
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::utils::constants::{STORAGE_KEY_TOKEN, STORAGE_KEY_USER};
use crate::utils::storage::KeyValueStorage;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthData {
    pub token: String,
    pub user: User,
}

/// Estado observable de la sesión. Token y usuario van juntos.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Aún no se ha leído el storage
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(AuthData),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(data) => Some(&data.user),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated(data) => Some(&data.token),
            _ => None,
        }
    }
}

/// Dueño de la sesión: backend autenticado + storage duradero
pub struct SessionManager<B: AuthBackend, S: KeyValueStorage> {
    backend: B,
    storage: S,
    state: ReactiveState<SessionState>,
    // Cambia en cada sign-in/sign-out; invalida respuestas en vuelo
    epoch: Cell<u64>,
}

impl<B: AuthBackend, S: KeyValueStorage> SessionManager<B, S> {
    pub fn new(backend: B, storage: S) -> Self {
        Self {
            backend,
            storage,
            state: ReactiveState::new(SessionState::Loading),
            epoch: Cell::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.token().map(str::to_string))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    fn bump_epoch(&self) {
        self.epoch.set(self.epoch.get() + 1);
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SessionState) + 'static,
    {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state.unsubscribe(id);
    }

    /// Restaura la sesión guardada. Sin llamadas de red.
    pub fn restore(&self) -> SessionState {
        let token = self.storage.get(STORAGE_KEY_TOKEN);
        let user = self
            .storage
            .get(STORAGE_KEY_USER)
            .and_then(|json| match serde_json::from_str::<User>(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("⚠️ [AUTH] Usuario guardado ilegible: {}", e);
                    None
                }
            });

        let restored = match (token, user) {
            (Some(token), Some(user)) if !token.is_empty() => {
                log::info!("💾 [AUTH] Sesión restaurada para {}", user.email);
                self.backend.set_auth_token(Some(&token));
                SessionState::Authenticated(AuthData { token, user })
            }
            (None, None) => SessionState::Unauthenticated,
            _ => {
                log::warn!("⚠️ [AUTH] Sesión guardada incompleta, limpiando storage");
                self.clear_storage();
                SessionState::Unauthenticated
            }
        };

        self.state.set(restored.clone());
        restored
    }

    /// Intercambia credenciales por token + usuario.
    /// Si falla, el estado y el storage quedan como estaban.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let started_at = self.epoch();
        let request = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self.backend.create_session(&request).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ [AUTH] Error en login: {}", e);
                return Err(e.into());
            }
        };

        if self.epoch() != started_at {
            log::warn!("⚠️ [AUTH] La sesión cambió durante el login, descartando respuesta");
            return Err(AuthError::Superseded);
        }

        self.persist(&response.token, &response.user)?;
        self.backend.set_auth_token(Some(&response.token));
        self.bump_epoch();
        self.state.set(SessionState::Authenticated(AuthData {
            token: response.token,
            user: response.user.clone(),
        }));

        log::info!("✅ [AUTH] Login correcto: {}", response.user.email);
        Ok(response.user)
    }

    /// Cierra la sesión. Idempotente.
    pub fn sign_out(&self) {
        self.clear_storage();
        self.backend.set_auth_token(None);
        self.bump_epoch();
        if !self.state.with(|s| *s == SessionState::Unauthenticated) {
            log::info!("👋 [AUTH] Logout");
            self.state.set(SessionState::Unauthenticated);
        }
    }

    /// Reemplaza el usuario completo de la sesión actual
    pub fn update_user(&self, user: User) -> Result<(), AuthError> {
        let Some(token) = self.token() else {
            log::error!("❌ [AUTH] update_user sin sesión activa");
            return Err(AuthError::NotAuthenticated);
        };

        let json = serde_json::to_string(&user).map_err(StorageError::from)?;
        self.storage.set(STORAGE_KEY_USER, &json)?;
        self.state
            .set(SessionState::Authenticated(AuthData { token, user }));
        Ok(())
    }

    /// `update_user` para respuestas de peticiones iniciadas en `epoch`.
    /// Si la sesión cambió entretanto, la respuesta se descarta.
    pub fn update_user_if_current(&self, epoch: u64, user: User) -> Result<(), AuthError> {
        if epoch != self.epoch() {
            log::warn!("⚠️ [AUTH] Respuesta de una sesión anterior, se ignora");
            return Err(AuthError::Superseded);
        }
        self.update_user(user)
    }

    /// Escribe token + usuario. Si una escritura falla, el storage vuelve
    /// a la sesión que tenía antes (la que sigue en memoria).
    fn persist(&self, token: &str, user: &User) -> Result<(), AuthError> {
        let json = serde_json::to_string(user).map_err(StorageError::from)?;
        let previous = [
            (STORAGE_KEY_TOKEN, self.storage.get(STORAGE_KEY_TOKEN)),
            (STORAGE_KEY_USER, self.storage.get(STORAGE_KEY_USER)),
        ];

        let written = self
            .storage
            .set(STORAGE_KEY_TOKEN, token)
            .and_then(|_| self.storage.set(STORAGE_KEY_USER, &json));
        if let Err(e) = written {
            log::error!("❌ [AUTH] Error guardando sesión: {}", e);
            self.rollback(&previous);
            return Err(e.into());
        }
        Ok(())
    }

    fn rollback(&self, previous: &[(&str, Option<String>)]) {
        for (key, value) in previous {
            let restored = match value {
                Some(value) => self.storage.set(key, value),
                None => self.storage.remove(key),
            };
            if let Err(e) = restored {
                log::error!("❌ [AUTH] {}", e);
            }
        }

        let intact = previous
            .iter()
            .all(|(key, value)| self.storage.get(key) == *value);
        if !intact {
            log::warn!("⚠️ [AUTH] No se pudo recuperar la sesión guardada, cerrando sesión");
            self.clear_storage();
            self.backend.set_auth_token(None);
            self.bump_epoch();
            self.state.set(SessionState::Unauthenticated);
        }
    }

    fn clear_storage(&self) {
        for key in [STORAGE_KEY_TOKEN, STORAGE_KEY_USER] {
            if let Err(e) = self.storage.remove(key) {
                log::error!("❌ [AUTH] {}", e);
            }
        }
    }
}
