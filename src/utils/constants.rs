/// Clave de localStorage para el token de sesión
pub const STORAGE_KEY_TOKEN: &str = "@GoBarber:token";

/// Clave de localStorage para el usuario autenticado (JSON)
pub const STORAGE_KEY_USER: &str = "@GoBarber:user";

/// Duración por defecto de un toast `info`/`success` antes de expirar (ms)
pub const DEFAULT_TOAST_DURATION_MS: u32 = 3000;

/// Longitud mínima de contraseña aceptada por los formularios
pub const MIN_PASSWORD_LENGTH: usize = 6;
