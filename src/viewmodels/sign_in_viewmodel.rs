// ============================================================================
// SIGN IN VIEWMODEL - Lógica del formulario de login
// ============================================================================
// Validación → login → toast de error si el backend rechaza.
// Los errores de validación van a los campos, nunca a un toast.
// ============================================================================

use crate::error::AuthError;
use crate::models::ToastSpec;
use crate::services::AuthBackend;
use crate::state::{NotificationCenter, SessionManager, TimerScheduler};
use crate::utils::storage::KeyValueStorage;
use crate::utils::validation::{FieldErrors, Validator};
use crate::viewmodels::FormOutcome;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    /// Copia con el e-mail sin espacios alrededor; la contraseña no se toca
    pub fn normalized(&self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("email", self.email.trim(), "E-mail empty")
            .email("email", self.email.trim(), "E-mail invalid")
            .required("password", &self.password, "Password empty")
            .finish()
    }
}

pub struct SignInViewModel;

impl SignInViewModel {
    pub async fn submit<B, S, T>(
        session: &SessionManager<B, S>,
        toasts: &NotificationCenter<T>,
        form: SignInForm,
    ) -> FormOutcome
    where
        B: AuthBackend,
        S: KeyValueStorage,
        T: TimerScheduler + 'static,
    {
        let form = form.normalized();
        if let Err(errors) = form.validate() {
            return FormOutcome::Invalid(errors);
        }

        match session.sign_in(&form.email, &form.password).await {
            Ok(_) => FormOutcome::Submitted,
            Err(AuthError::Request(e)) if e.field_errors().is_some() => {
                FormOutcome::Invalid(e.field_errors().cloned().unwrap_or_default())
            }
            Err(AuthError::Superseded) => FormOutcome::Failed,
            Err(e) => {
                log::error!("❌ [SIGNIN] {}", e);
                toasts.add_toast(
                    ToastSpec::error("Authentication error")
                        .with_description("Could not sign in, check your credentials"),
                );
                FormOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;
    use crate::models::ToastType;
    use crate::state::SessionState;
    use crate::test_support::{user, ManualScheduler, MockBackend};
    use crate::utils::constants::STORAGE_KEY_TOKEN;
    use crate::utils::storage::MemoryStorage;

    fn form(email: &str, password: &str) -> SignInForm {
        SignInForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn signs_in_without_raising_errors() {
        let storage = MemoryStorage::new();
        let session = SessionManager::new(
            MockBackend::signing_in_as("tok-1", user("u1", "A", "a@b.com")),
            storage.clone(),
        );
        session.restore();
        let toasts = NotificationCenter::new(ManualScheduler::new(), 3000);

        let outcome = SignInViewModel::submit(&session, &toasts, form("a@b.com", "secret1")).await;

        assert_eq!(outcome, FormOutcome::Submitted);
        assert_eq!(session.user(), Some(user("u1", "A", "a@b.com")));
        assert_eq!(storage.get(STORAGE_KEY_TOKEN).as_deref(), Some("tok-1"));
        assert!(toasts
            .messages()
            .iter()
            .all(|t| t.toast_type != ToastType::Error));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend_nor_toasts() {
        let session = SessionManager::new(MockBackend::new(), MemoryStorage::new());
        session.restore();
        let toasts = NotificationCenter::new(ManualScheduler::new(), 3000);

        let outcome = SignInViewModel::submit(&session, &toasts, form("not-an-email", "")).await;

        let FormOutcome::Invalid(errors) = outcome else {
            panic!("expected field errors");
        };
        assert_eq!(errors["email"], "E-mail invalid");
        assert_eq!(errors["password"], "Password empty");
        assert_eq!(session.backend().request_count.get(), 0);
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn rejected_credentials_raise_a_persistent_error_toast() {
        let backend = MockBackend::new();
        *backend.session_result.borrow_mut() = Err(RequestError::Status {
            status: 401,
            message: "Incorrect email/password combination.".to_string(),
        });
        let session = SessionManager::new(backend, MemoryStorage::new());
        session.restore();
        let clock = ManualScheduler::new();
        let toasts = NotificationCenter::new(clock.clone(), 3000);

        let outcome = SignInViewModel::submit(&session, &toasts, form("a@b.com", "wrong1")).await;

        assert_eq!(outcome, FormOutcome::Failed);
        assert_eq!(session.state(), SessionState::Unauthenticated);
        clock.advance(3001);
        let messages = toasts.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].toast_type, ToastType::Error);
    }

    #[tokio::test]
    async fn backend_field_errors_are_not_toasted() {
        let backend = MockBackend::new();
        let mut fields = FieldErrors::new();
        fields.insert("email".to_string(), "\"email\" must be a valid email".to_string());
        *backend.session_result.borrow_mut() = Err(RequestError::Validation(fields));
        let session = SessionManager::new(backend, MemoryStorage::new());
        session.restore();
        let toasts = NotificationCenter::new(ManualScheduler::new(), 3000);

        let outcome = SignInViewModel::submit(&session, &toasts, form("a@b.com", "secret1")).await;

        assert!(matches!(outcome, FormOutcome::Invalid(ref f) if f.contains_key("email")));
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn email_is_trimmed_before_validation_and_sign_in() {
        let session = SessionManager::new(
            MockBackend::signing_in_as("tok-1", user("u1", "A", "a@b.com")),
            MemoryStorage::new(),
        );
        session.restore();
        let toasts = NotificationCenter::new(ManualScheduler::new(), 3000);

        let outcome = SignInViewModel::submit(&session, &toasts, form("  a@b.com ", "secret1")).await;

        assert_eq!(outcome, FormOutcome::Submitted);
        let sent = session.backend().last_sign_in.borrow().clone().unwrap();
        assert_eq!(sent.email, "a@b.com");
        assert_eq!(sent.password, "secret1");
    }
}
