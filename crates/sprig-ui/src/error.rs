//! Raising and catching widget assembly errors.
//!
//! A widget that cannot render (a part used outside its root, a slot given
//! two children) logs the error and unwinds with a [`UiError`] payload.
//! [`ErrorBoundary`] stops the unwind and renders a fallback instead.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind, panic_any};

use sprig_core::{ContextError, UiError};

/// What an [`ErrorBoundary`] fallback receives.
#[derive(Clone, Debug)]
pub struct ErrorInfo {
    pub message: String,
    /// Set when the unwind came from a widget error rather than a plain panic.
    pub error: Option<UiError>,
}

/// Aborts the current widget with `err`.
pub fn raise(err: impl Into<UiError>) -> ! {
    let err = err.into();
    log::error!("{err}");
    panic_any(err)
}

pub(crate) fn expect_context<T>(read: Result<T, ContextError>) -> T {
    read.unwrap_or_else(|e| raise(e))
}

/// Builds `content`; if it unwinds, builds `fallback` from the error instead.
pub fn ErrorBoundary<R>(fallback: impl FnOnce(ErrorInfo) -> R, content: impl FnOnce() -> R) -> R {
    match catch_unwind(AssertUnwindSafe(content)) {
        Ok(out) => out,
        Err(payload) => {
            let info = error_info(payload);
            log::warn!("ErrorBoundary caught: {}", info.message);
            fallback(info)
        }
    }
}

fn error_info(payload: Box<dyn Any + Send>) -> ErrorInfo {
    if let Some(err) = payload.downcast_ref::<UiError>() {
        return ErrorInfo {
            message: err.to_string(),
            error: Some(err.clone()),
        };
    }
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    ErrorInfo {
        message,
        error: None,
    }
}
