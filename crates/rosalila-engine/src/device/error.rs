use std::sync::{Arc, Mutex};

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Messages reported by the backend outside of any call we made.
///
/// wgpu may invoke its uncaptured-error handler from its own context, so the
/// list is shared behind a mutex and drained on the render thread.
#[derive(Debug, Clone, Default)]
pub struct PlatformErrors {
    inner: Arc<Mutex<Vec<String>>>,
}

impl PlatformErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: impl Into<String>) {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.push(message.into());
    }

    /// Takes every pending message, oldest first.
    pub fn drain(&self) -> Vec<String> {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *guard)
    }

    /// Routes the device's uncaptured errors into this list.
    pub(crate) fn install(&self, device: &wgpu::Device) {
        let errors = self.clone();
        device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
            errors.push(err.to_string());
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_in_order() {
        let errors = PlatformErrors::new();
        errors.push("first");
        errors.push(String::from("second"));
        assert_eq!(errors.drain(), vec!["first", "second"]);
        assert!(errors.drain().is_empty());
    }

    #[test]
    fn clones_share_one_list() {
        let errors = PlatformErrors::new();
        let handle = errors.clone();
        std::thread::spawn(move || handle.push("from another thread"))
            .join()
            .unwrap();
        assert_eq!(errors.drain(), vec!["from another thread"]);
    }
}
