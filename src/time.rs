//! Platform-agnostic clock
//!
//! Every engine entry point takes `now` in milliseconds; this is where the
//! real value comes from.

/// Milliseconds on the page clock (`performance.now()`, falling back to `Date.now()`)
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn now_millis() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Milliseconds since the first call in this process
#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
pub fn now_millis() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotonic() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
