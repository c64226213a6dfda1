use serde::{Deserialize, Serialize};

use crate::models::User;

/// Cuerpo de `POST /sessions`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Respuesta de `POST /sessions`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

/// Cuerpo de `PUT /profile`. Los campos de contraseña solo viajan
/// cuando el usuario está cambiando la contraseña.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

/// Archivo de avatar leído del input, enviado como multipart (`avatar`)
#[derive(Clone, PartialEq, Debug)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
