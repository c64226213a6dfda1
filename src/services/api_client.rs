// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP.
// El único estado es el token que se adjunta como `Authorization`.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::config::CONFIG;
use crate::error::RequestError;
use crate::models::{AvatarUpload, SessionResponse, SignInRequest, UpdateProfileRequest, User};
use crate::utils::validation::FieldErrors;

/// Colaborador HTTP que usa `SessionManager` y las páginas.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// Token que se adjunta por defecto a las peticiones siguientes
    fn set_auth_token(&self, token: Option<&str>);

    /// `POST /sessions`
    async fn create_session(&self, request: &SignInRequest) -> Result<SessionResponse, RequestError>;

    /// `PUT /profile`
    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, RequestError>;

    /// `PATCH /users/avatar` (multipart, campo `avatar`)
    async fn update_avatar(&self, upload: &AvatarUpload) -> Result<User, RequestError>;
}

/// Cliente API sobre gloo-net
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    auth_token: Rc<RefCell<Option<String>>>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.backend_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: Rc::new(RefCell::new(None)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.auth_token.borrow().as_deref() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = RequestError::from_response(status, &body);
            log::warn!("⚠️ [API] {}", error);
            return Err(error);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| RequestError::Parse(e.to_string()))
    }

    fn avatar_form(upload: &AvatarUpload) -> Result<FormData, RequestError> {
        let form = FormData::new().map_err(js_error)?;
        let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&upload.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_error)?;
        form.append_with_blob_and_filename("avatar", &blob, &upload.file_name)
            .map_err(js_error)?;
        Ok(form)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthBackend for ApiClient {
    fn set_auth_token(&self, token: Option<&str>) {
        *self.auth_token.borrow_mut() = token.map(str::to_string);
    }

    async fn create_session(&self, request: &SignInRequest) -> Result<SessionResponse, RequestError> {
        log::info!("🔐 [API] Creando sesión para: {}", request.email);

        let response = Request::post(&self.url("/sessions"))
            .json(request)
            .map_err(|e| RequestError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, RequestError> {
        log::info!("📝 [API] Actualizando perfil");

        let response = self
            .with_auth(Request::put(&self.url("/profile")))
            .json(request)
            .map_err(|e| RequestError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn update_avatar(&self, upload: &AvatarUpload) -> Result<User, RequestError> {
        log::info!("📷 [API] Subiendo avatar: {} ({} bytes)", upload.file_name, upload.bytes.len());

        let form = Self::avatar_form(upload)?;
        let response = self
            .with_auth(Request::patch(&self.url("/users/avatar")))
            .body(form)
            .map_err(|e| RequestError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        Self::read_json(response).await
    }
}

fn js_error(value: JsValue) -> RequestError {
    RequestError::Serialization(format!("{:?}", value))
}

// Cuerpos de error conocidos del backend

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
    #[serde(default)]
    validation: Option<CelebrateValidation>,
}

#[derive(Deserialize)]
struct CelebrateValidation {
    #[serde(default)]
    body: Option<CelebrateSegment>,
}

#[derive(Deserialize)]
struct CelebrateSegment {
    #[serde(default)]
    keys: Vec<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RequestError {
    /// Clasifica una respuesta no-2xx. Los 400/422 con detalle por campo
    /// se convierten en `Validation`; el resto en `Status`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();

        if matches!(status, 400 | 422) {
            if let Some(fields) = parsed.as_ref().and_then(field_errors_of) {
                return RequestError::Validation(fields);
            }
        }

        let message = parsed
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.to_string()
                }
            });
        RequestError::Status { status, message }
    }
}

fn field_errors_of(body: &ErrorBody) -> Option<FieldErrors> {
    if let Some(errors) = body.errors.as_ref().filter(|e| !e.is_empty()) {
        return Some(errors.clone());
    }

    let segment = body.validation.as_ref()?.body.as_ref()?;
    if segment.keys.is_empty() {
        return None;
    }
    let message = segment
        .message
        .clone()
        .or_else(|| body.message.clone())
        .unwrap_or_else(|| "Invalid value".to_string());
    Some(
        segment
            .keys
            .iter()
            .map(|key| (key.clone(), message.clone()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celebrate_body_becomes_field_errors() {
        let body = r#"{
            "statusCode": 400,
            "error": "Bad Request",
            "message": "celebrate request validation failed",
            "validation": { "body": { "source": "body", "keys": ["email"], "message": "\"email\" must be a valid email" } }
        }"#;

        let error = RequestError::from_response(400, body);

        let fields = error.field_errors().expect("validation error");
        assert_eq!(fields["email"], "\"email\" must be a valid email");
    }

    #[test]
    fn errors_map_becomes_field_errors() {
        let body = r#"{ "errors": { "previous_password": "Previous password does not match" } }"#;

        let error = RequestError::from_response(422, body);

        assert_eq!(
            error.field_errors().unwrap()["previous_password"],
            "Previous password does not match"
        );
    }

    #[test]
    fn app_error_body_becomes_status_error() {
        let body = r#"{ "status": "error", "message": "Incorrect email/password combination." }"#;

        let error = RequestError::from_response(401, body);

        assert_eq!(
            error,
            RequestError::Status {
                status: 401,
                message: "Incorrect email/password combination.".to_string()
            }
        );
        assert!(error.field_errors().is_none());
    }

    #[test]
    fn bad_request_without_fields_is_a_status_error() {
        let error = RequestError::from_response(400, "");

        assert_eq!(
            error,
            RequestError::Status { status: 400, message: "Unknown error".to_string() }
        );
    }

    #[test]
    fn base_url_has_no_trailing_slash() {
        let client = ApiClient::with_base_url("http://localhost:3333/");
        assert_eq!(client.url("/sessions"), "http://localhost:3333/sessions");
    }

    #[test]
    fn auth_token_is_replaced_and_cleared() {
        let client = ApiClient::with_base_url("http://localhost:3333");
        client.set_auth_token(Some("tok-1"));
        assert_eq!(client.auth_token.borrow().as_deref(), Some("tok-1"));

        client.set_auth_token(None);
        assert!(client.auth_token.borrow().is_none());
    }
}
