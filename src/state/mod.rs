// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod timers;
pub mod toast_state;
pub mod auth_state;

pub use reactivity::*;
pub use timers::*;
pub use toast_state::*;
pub use auth_state::*;
