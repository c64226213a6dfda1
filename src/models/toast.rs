use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identificador único de un toast, estable durante toda su vida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(Uuid);

impl ToastId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    Info,
    Success,
    Error,
}

impl ToastType {
    /// Los errores permanecen hasta que el usuario los cierra
    pub fn auto_expires(self) -> bool {
        !matches!(self, ToastType::Error)
    }

    /// Clase CSS usada por `ToastContainer`
    pub fn css_class(self) -> &'static str {
        match self {
            ToastType::Info => "toast-info",
            ToastType::Success => "toast-success",
            ToastType::Error => "toast-error",
        }
    }
}

/// Lo que pide quien quiere mostrar un toast
#[derive(Debug, Clone, PartialEq)]
pub struct ToastSpec {
    pub toast_type: ToastType,
    pub title: String,
    pub description: Option<String>,
}

impl ToastSpec {
    pub fn new(toast_type: ToastType, title: impl Into<String>) -> Self {
        Self {
            toast_type,
            title: title.into(),
            description: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastType::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastType::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastType::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Toast activo. No se modifica después de creado.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: ToastId,
    pub toast_type: ToastType,
    pub title: String,
    pub description: Option<String>,
}

impl ToastMessage {
    pub fn from_spec(spec: ToastSpec) -> Self {
        Self {
            id: ToastId::new(),
            toast_type: spec.toast_type,
            title: spec.title,
            description: spec.description,
        }
    }

    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}
