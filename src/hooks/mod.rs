pub mod use_toast;
pub mod use_auth;

pub use use_toast::{use_toast, AppNotificationCenter, ToastContext, ToastProvider};
pub use use_auth::{use_auth, AppSessionManager, AuthContext, AuthProvider};
