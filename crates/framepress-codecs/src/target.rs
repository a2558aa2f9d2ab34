use std::sync::{Arc, Mutex};

/// The operator-adjustable quality target.
///
/// Handles are cheap to clone and share one value. A search reads the target
/// exactly once when it starts, so adjustments land between frames, never
/// mid-search. Reads clamp the stored value to [0, 100], mirroring the
/// per-frame clamp applied to operator input.
#[derive(Clone)]
pub struct SharedTarget {
    value: Arc<Mutex<f64>>,
}

impl SharedTarget {
    pub fn new(initial: f64) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn set(&self, value: f64) {
        *self.value.lock().unwrap() = value;
    }

    /// Nudges the target, the way a key binding would.
    pub fn adjust(&self, delta: f64) {
        *self.value.lock().unwrap() += delta;
    }

    pub fn get(&self) -> f64 {
        let mut value = self.value.lock().unwrap();
        *value = value.clamp(0.0, 100.0);
        *value
    }
}
