use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use initorder::unit::RunAction;

/// Shared log of which unit actions ran, in call order.
///
/// Hand out actions with [`Recorder::action`] and friends, run the pass,
/// then inspect [`Recorder::calls`].
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action that records `id` and succeeds.
    pub fn action(&self, id: &str) -> RunAction {
        let calls = Arc::clone(&self.calls);
        let id = id.to_string();
        RunAction::new(move || {
            calls.lock().unwrap().push(id.clone());
            Ok(())
        })
    }

    /// Action that records `id` and returns an error.
    pub fn failing(&self, id: &str, message: &str) -> RunAction {
        let calls = Arc::clone(&self.calls);
        let id = id.to_string();
        let message = message.to_string();
        RunAction::new(move || {
            calls.lock().unwrap().push(id.clone());
            Err(anyhow!(message.clone()))
        })
    }

    /// Action that records `id` and panics.
    pub fn panicking(&self, id: &str, message: &str) -> RunAction {
        let calls = Arc::clone(&self.calls);
        let id = id.to_string();
        let message = message.to_string();
        RunAction::new(move || {
            calls.lock().unwrap().push(id.clone());
            panic!("{}", message);
        })
    }

    /// Action that records `id`, then sleeps for `ms` milliseconds.
    pub fn sleeping(&self, id: &str, ms: u64) -> RunAction {
        let calls = Arc::clone(&self.calls);
        let id = id.to_string();
        RunAction::new(move || {
            calls.lock().unwrap().push(id.clone());
            std::thread::sleep(std::time::Duration::from_millis(ms));
            Ok(())
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}
