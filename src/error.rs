// ============================================================================
// ERRORES - Taxonomía de errores del cliente
// ============================================================================
// RequestError: rechazo del backend o fallo de red
// StorageError: fallo de localStorage
// AuthError: errores de las operaciones de sesión
// ============================================================================

use crate::utils::validation::FieldErrors;

/// Fallo de una petición HTTP al backend
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// No se pudo completar la petición (sin red, CORS, etc.)
    #[error("network error: {0}")]
    Network(String),
    /// El backend respondió con un estado no-2xx
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// El backend rechazó campos concretos del formulario
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),
    /// La respuesta no tenía el formato esperado
    #[error("parse error: {0}")]
    Parse(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RequestError {
    /// Errores que se muestran como anotaciones de campo en lugar de toast
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            RequestError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Fallo del almacenamiento duradero
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("failed to write key {0}")]
    Write(String),
    #[error("failed to remove key {0}")]
    Remove(String),
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errores de las operaciones de `SessionManager`
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Operación que exige sesión invocada sin sesión (error de programación)
    #[error("operation requires an authenticated session")]
    NotAuthenticated,
    /// El resultado pertenece a una sesión que ya fue cerrada o reemplazada
    #[error("session changed while the request was in flight")]
    Superseded,
}
