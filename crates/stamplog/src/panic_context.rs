//! Catch panics as enriched errors
//!
//! [`catch`] runs a closure under `catch_unwind`. While it runs, a panic
//! hook records the panic's location and message for the current thread,
//! so the resulting [`EnrichedError`] points at the line that panicked
//! rather than the line that caught it. Panics outside a catch scope go to
//! the previously installed hook unchanged.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, UnwindSafe};

use once_cell::sync::OnceCell;

use crate::error::{EnrichedError, SourceLocation};

/// Errors reading the panic context
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// No panic was captured on this thread
    #[error("no active panic on this thread")]
    NoActivePanic,
}

pub type ContextResult<T> = Result<T, ContextError>;

/// A panic captured inside a catch scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPanic {
    pub location: SourceLocation,
    pub message: String,
}

impl CapturedPanic {
    /// Enrich the captured panic
    pub fn into_error(self) -> EnrichedError {
        EnrichedError::at(self.location, PanicMessage(self.message))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct PanicMessage(String);

thread_local! {
    static SCOPE_DEPTH: Cell<usize> = const { Cell::new(0) };
    static CAPTURED: RefCell<Option<CapturedPanic>> = const { RefCell::new(None) };
}

static HOOK: OnceCell<()> = OnceCell::new();

fn install_hook() {
    HOOK.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let in_scope = SCOPE_DEPTH.try_with(|depth| depth.get() > 0).unwrap_or(false);
            if !in_scope {
                previous(info);
                return;
            }
            let location = info
                .location()
                .map(SourceLocation::from)
                .unwrap_or_else(|| SourceLocation::new("<unknown>", 0));
            let captured = CapturedPanic {
                location,
                message: payload_message(info.payload()),
            };
            let _ = CAPTURED.try_with(|slot| *slot.borrow_mut() = Some(captured));
        }));
    });
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

/// Take the last panic captured on this thread
///
/// Returns [`ContextError::NoActivePanic`] when nothing was captured,
/// i.e. when called outside the aftermath of a caught panic.
pub fn take_current() -> ContextResult<CapturedPanic> {
    CAPTURED
        .with(|slot| slot.borrow_mut().take())
        .ok_or(ContextError::NoActivePanic)
}

fn clear_current() {
    CAPTURED.with(|slot| slot.borrow_mut().take());
}

/// Run `f`, turning a panic into an [`EnrichedError`] stamped with the
/// location of the panic
///
/// ```
/// use stamplog::panic_context::catch;
///
/// let err = catch(|| -> u32 { panic!("bad input") }).unwrap_err();
/// assert_eq!(err.original_message(), "bad input");
/// ```
pub fn catch<F, T>(f: F) -> Result<T, EnrichedError>
where
    F: FnOnce() -> T + UnwindSafe,
{
    install_hook();
    clear_current();
    SCOPE_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let result = panic::catch_unwind(f);
    SCOPE_DEPTH.with(|depth| depth.set(depth.get() - 1));

    match result {
        Ok(value) => {
            // Panics handled inside `f` must not outlive this scope
            clear_current();
            Ok(value)
        }
        Err(payload) => match take_current() {
            Ok(captured) => Err(captured.into_error()),
            // Another hook replaced ours; only the payload is left
            Err(ContextError::NoActivePanic) => Err(EnrichedError::at(
                SourceLocation::new("<unknown>", 0),
                PanicMessage(payload_message(payload.as_ref())),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;

    #[test]
    fn test_division_by_zero() {
        let zero = black_box(0);
        let line = line!() + 1;
        let err = catch(move || 10 / zero).unwrap_err();

        let message = err.to_string();
        assert!(message.contains(&format!("name [{}]", file!())));
        assert!(message.contains(&format!("line number [{}]", line)));
        assert!(message.contains("attempt to divide by zero"));
    }

    #[test]
    fn test_no_panic() {
        assert_eq!(catch(|| 2 + 2).unwrap(), 4);
        assert!(matches!(take_current(), Err(ContextError::NoActivePanic)));
    }

    #[test]
    fn test_formatted_panic_message() {
        let id = 7;
        let err = catch(move || -> () { panic!("record {} missing", id) }).unwrap_err();
        assert_eq!(err.original_message(), "record 7 missing");
    }

    #[test]
    fn test_nested_catch() {
        let outer = catch(|| {
            let inner = catch(|| -> () { panic!("inner") }).unwrap_err();
            assert_eq!(inner.original_message(), "inner");
            panic!("outer");
        })
        .unwrap_err();
        assert_eq!(outer.original_message(), "outer");
    }

    #[test]
    fn test_panic_handled_inside_leaves_no_capture() {
        let value = catch(|| {
            let _ = std::panic::catch_unwind(|| -> () { panic!("handled inside") });
            5
        })
        .unwrap();
        assert_eq!(value, 5);
        assert!(matches!(take_current(), Err(ContextError::NoActivePanic)));
    }

    #[test]
    fn test_capture_is_consumed() {
        let _ = catch(|| -> () { panic!("once") });
        assert!(take_current().is_err());
    }

    #[test]
    fn test_same_panic_site_is_deterministic() {
        fn fails() -> u8 {
            panic!("fixed")
        }
        let a = catch(fails).unwrap_err();
        let b = catch(fails).unwrap_err();
        assert_eq!(a.to_string(), b.to_string());
    }
}
