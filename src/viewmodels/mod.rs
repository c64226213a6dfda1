// ============================================================================
// VIEWMODELS - Lógica de los formularios (sin DOM)
// ============================================================================

pub mod sign_in_viewmodel;
pub mod profile_viewmodel;

pub use sign_in_viewmodel::{SignInForm, SignInViewModel};
pub use profile_viewmodel::{ProfileForm, ProfileViewModel};

use crate::utils::validation::FieldErrors;

/// Resultado de enviar un formulario
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Submitted,
    /// Errores por campo para pintar junto a cada input
    Invalid(FieldErrors),
    /// Fallo ya comunicado al usuario (toast) o descartado
    Failed,
}
