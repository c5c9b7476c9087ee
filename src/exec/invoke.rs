// src/exec/invoke.rs

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::unit::RunAction;

/// Run `action` once, returning a failure detail on error or panic.
///
/// An `Err` is rendered with its whole context chain. A panic is caught and
/// its payload message returned, so one misbehaving unit cannot unwind
/// through the execution pass.
pub fn invoke(action: &RunAction) -> Result<(), String> {
    match panic::catch_unwind(AssertUnwindSafe(|| action.call())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(format!("{err:#}")),
        Err(payload) => Err(format!("panicked: {}", panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
