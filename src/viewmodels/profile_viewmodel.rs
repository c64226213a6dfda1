// ============================================================================
// PROFILE VIEWMODEL - Edición de perfil y avatar
// ============================================================================
// La contraseña solo se valida y se envía si el usuario rellenó la
// contraseña actual. El usuario de la sesión solo cambia con una respuesta
// correcta del backend y si la sesión sigue siendo la misma.
// ============================================================================

use crate::error::{AuthError, RequestError};
use crate::models::{AvatarUpload, ToastSpec, UpdateProfileRequest, User};
use crate::services::AuthBackend;
use crate::state::{NotificationCenter, SessionManager, TimerScheduler};
use crate::utils::constants::MIN_PASSWORD_LENGTH;
use crate::utils::storage::KeyValueStorage;
use crate::utils::validation::{FieldErrors, Validator};
use crate::viewmodels::FormOutcome;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub previous_password: String,
    pub password: String,
    pub password_confirmation: String,
}

impl ProfileForm {
    /// Formulario inicial a partir del usuario de la sesión
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            ..Self::default()
        }
    }

    pub fn changes_password(&self) -> bool {
        !self.previous_password.is_empty()
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut validator = Validator::new();
        validator
            .required("name", self.name.trim(), "Name empty")
            .required("email", self.email.trim(), "E-mail empty")
            .email("email", self.email.trim(), "E-mail invalid");

        if self.changes_password() {
            validator
                .required("password", &self.password, "New password empty")
                .min_len("password", &self.password, MIN_PASSWORD_LENGTH, "Password invalid")
                .required("password_confirmation", &self.password_confirmation, "Confirmation empty")
                .equals(
                    "password_confirmation",
                    &self.password_confirmation,
                    &self.password,
                    "Password confirmation does not match",
                );
        }

        validator.finish()
    }

    pub fn to_request(&self) -> UpdateProfileRequest {
        let changing = self.changes_password();
        let when_changing = |value: &String| changing.then(|| value.clone());

        UpdateProfileRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            previous_password: when_changing(&self.previous_password),
            password: when_changing(&self.password),
            password_confirmation: when_changing(&self.password_confirmation),
        }
    }
}

pub struct ProfileViewModel;

impl ProfileViewModel {
    /// `PUT /profile` con el formulario completo
    pub async fn submit<B, S, T>(
        session: &SessionManager<B, S>,
        toasts: &NotificationCenter<T>,
        form: ProfileForm,
    ) -> FormOutcome
    where
        B: AuthBackend,
        S: KeyValueStorage,
        T: TimerScheduler + 'static,
    {
        if let Err(errors) = form.validate() {
            return FormOutcome::Invalid(errors);
        }
        if !session.is_authenticated() {
            log::error!("❌ [PROFILE] Envío de perfil sin sesión activa");
            return FormOutcome::Failed;
        }

        let epoch = session.epoch();
        let result = session.backend().update_profile(&form.to_request()).await;
        Self::apply(session, toasts, epoch, result, "Profile updated", "Error updating profile")
    }

    /// `PATCH /users/avatar`; si falla el avatar anterior se mantiene
    pub async fn change_avatar<B, S, T>(
        session: &SessionManager<B, S>,
        toasts: &NotificationCenter<T>,
        upload: AvatarUpload,
    ) -> FormOutcome
    where
        B: AuthBackend,
        S: KeyValueStorage,
        T: TimerScheduler + 'static,
    {
        if !session.is_authenticated() {
            log::error!("❌ [PROFILE] Cambio de avatar sin sesión activa");
            return FormOutcome::Failed;
        }

        let epoch = session.epoch();
        let result = session.backend().update_avatar(&upload).await;
        Self::apply(session, toasts, epoch, result, "Avatar updated", "Error updating avatar")
    }

    fn apply<B, S, T>(
        session: &SessionManager<B, S>,
        toasts: &NotificationCenter<T>,
        epoch: u64,
        result: Result<User, RequestError>,
        success_title: &str,
        error_title: &str,
    ) -> FormOutcome
    where
        B: AuthBackend,
        S: KeyValueStorage,
        T: TimerScheduler + 'static,
    {
        let user = match result {
            Ok(user) => user,
            Err(RequestError::Validation(fields)) => return FormOutcome::Invalid(fields),
            Err(e) => {
                log::error!("❌ [PROFILE] {}", e);
                toasts.add_toast(ToastSpec::error(error_title).with_description(e.to_string()));
                return FormOutcome::Failed;
            }
        };

        match session.update_user_if_current(epoch, user) {
            Ok(()) => {
                log::info!("✅ [PROFILE] {}", success_title);
                toasts.add_toast(ToastSpec::success(success_title));
                FormOutcome::Submitted
            }
            Err(AuthError::Superseded) | Err(AuthError::NotAuthenticated) => FormOutcome::Failed,
            Err(e) => {
                log::error!("❌ [PROFILE] {}", e);
                toasts.add_toast(ToastSpec::error(error_title).with_description(e.to_string()));
                FormOutcome::Failed
            }
        }
    }
}
