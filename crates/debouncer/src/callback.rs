//! Callback shapes accepted by the debouncer

use std::fmt;
use std::sync::Arc;

/// Which callback shape is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Zero-argument callback, driven by `signal()`
    Simple,
    /// Single-argument callback, driven by `signal_with_data()`
    Payload,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Simple => f.write_str("simple"),
            Mode::Payload => f.write_str("payload"),
        }
    }
}

/// Callback invoked when a round settles
///
/// Exactly one shape is active at a time. Callbacks are shared behind an
/// `Arc` so the firing task can take a cheap snapshot and run it without
/// holding the engine lock.
pub enum Callback<T> {
    /// Zero-argument procedure
    Simple(Arc<dyn Fn() + Send + Sync>),
    /// Procedure receiving the latest payload of the round
    Payload(Arc<dyn Fn(T) + Send + Sync>),
}

impl<T> Callback<T> {
    /// Wrap a zero-argument closure
    pub fn simple<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Callback::Simple(Arc::new(f))
    }

    /// Wrap a payload-taking closure
    pub fn payload<F>(f: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Callback::Payload(Arc::new(f))
    }

    /// Shape of this callback
    pub fn mode(&self) -> Mode {
        match self {
            Callback::Simple(_) => Mode::Simple,
            Callback::Payload(_) => Mode::Payload,
        }
    }

    /// Run the callback with the payload captured for the round
    ///
    /// Returns the callback's mode as the error when the payload does not fit
    /// its shape; nothing runs in that case.
    pub(crate) fn invoke(&self, payload: Option<T>) -> Result<(), Mode> {
        match (self, payload) {
            (Callback::Simple(f), None) => {
                f();
                Ok(())
            }
            (Callback::Payload(f), Some(data)) => {
                f(data);
                Ok(())
            }
            (callback, _) => Err(callback.mode()),
        }
    }
}

impl<T> Default for Callback<T> {
    /// No-op simple callback
    fn default() -> Self {
        Callback::simple(|| {})
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        match self {
            Callback::Simple(f) => Callback::Simple(Arc::clone(f)),
            Callback::Payload(f) => Callback::Payload(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.mode()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_default_is_simple_noop() {
        let callback: Callback<String> = Callback::default();

        assert_eq!(callback.mode(), Mode::Simple);
        assert_eq!(callback.invoke(None), Ok(()));
    }

    #[test]
    fn test_simple_invoke() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let callback: Callback<()> = Callback::simple(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        callback.invoke(None).unwrap();
        callback.clone().invoke(None).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_payload_invoke_receives_value() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback = Callback::payload(move |data: u32| sink.lock().push(data));

        callback.invoke(Some(7)).unwrap();

        assert_eq!(callback.mode(), Mode::Payload);
        assert_eq!(*seen.lock(), vec![7]);
    }

    #[test]
    fn test_shape_mismatch_runs_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let simple: Callback<u32> = Callback::simple(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let payload: Callback<u32> = Callback::payload(|_| panic!("must not run"));

        assert_eq!(simple.invoke(Some(1)), Err(Mode::Simple));
        assert_eq!(payload.invoke(None), Err(Mode::Payload));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Simple.to_string(), "simple");
        assert_eq!(Mode::Payload.to_string(), "payload");
        assert_eq!(format!("{:?}", Callback::<()>::default()), "Callback(Simple)");
    }
}
