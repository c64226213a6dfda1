pub mod auth;
pub mod toast;
pub mod user;

pub use auth::{AvatarUpload, SessionResponse, SignInRequest, UpdateProfileRequest};
pub use toast::{ToastId, ToastMessage, ToastSpec, ToastType};
pub use user::User;
