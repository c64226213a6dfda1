// ============================================================================
// TIMERS - Temporizadores cancelables para la expiración de toasts
// ============================================================================

use gloo_timers::callback::Timeout;

/// Programa callbacks diferidos. Soltar el handle cancela el temporizador
/// si aún no ha disparado.
pub trait TimerScheduler {
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` del navegador vía gloo-timers.
/// `Timeout` hace `clearTimeout` en su `Drop`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlooScheduler;

impl TimerScheduler for GlooScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}
