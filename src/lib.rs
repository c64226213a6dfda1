// ============================================================================
// GOBARBER WEB - FRONTEND MVVM (RUST PURO + YEW)
// ============================================================================
// Arquitectura:
// - Components: Vistas Yew (sin lógica)
// - Hooks: Providers + acceso a sesión y toasts vía Context
// - ViewModels: Lógica de formularios
// - Services: SOLO comunicación API
// - State: SessionManager + NotificationCenter con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod components;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
pub(crate) mod test_support;

use crate::components::App;
use crate::config::CONFIG;

/// Punto de entrada: panic hook, logging y render de la app
pub fn run() {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 GoBarber web ({} → {})", CONFIG.environment, CONFIG.backend_url());

    yew::Renderer::<App>::new().render();
}
