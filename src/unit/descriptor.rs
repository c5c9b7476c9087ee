// src/unit/descriptor.rs

use std::fmt;
use std::sync::Arc;

use crate::types::UnitId;

type ActionFn = dyn Fn() -> anyhow::Result<()> + Send + Sync;

/// Opaque zero-argument callback executed for a unit.
///
/// Cloning a `RunAction` shares the underlying closure. Two actions are the
/// *same* registration iff they point at the same allocation, which is how
/// the registry tells a repeated registration apart from a conflicting one.
#[derive(Clone)]
pub struct RunAction {
    inner: Arc<ActionFn>,
}

impl RunAction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Invoke the callback. Panics are *not* caught here; see
    /// [`crate::exec::invoke`].
    pub fn call(&self) -> anyhow::Result<()> {
        (self.inner)()
    }

    /// Whether `self` and `other` are clones of the same action.
    pub fn same_as(&self, other: &RunAction) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl fmt::Debug for RunAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunAction({:p})", Arc::as_ptr(&self.inner))
    }
}

/// A unit as produced by discovery: identity, declared dependencies, an
/// optional action and an optional self-reported priority.
///
/// `dependencies` behaves as an ordered set: declaration order is kept,
/// repeated ids and empty ids are dropped as they are added.
#[derive(Debug, Clone)]
pub struct UnitDescriptor {
    id: UnitId,
    dependencies: Vec<UnitId>,
    action: Option<RunAction>,
    priority_hint: Option<i64>,
}

impl UnitDescriptor {
    pub fn new(id: impl Into<UnitId>) -> Self {
        Self {
            id: id.into(),
            dependencies: Vec::new(),
            action: None,
            priority_hint: None,
        }
    }

    /// Declare that this unit must run after every id in `deps`.
    pub fn depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UnitId>,
    {
        for dep in deps {
            let dep = dep.into();
            if dep.trim().is_empty() || self.dependencies.contains(&dep) {
                continue;
            }
            self.dependencies.push(dep);
        }
        self
    }

    pub fn with_action(mut self, action: RunAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Shorthand for `with_action(RunAction::new(f))`.
    pub fn with_fn<F>(self, f: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.with_action(RunAction::new(f))
    }

    /// Priority the unit reports for itself. Only used to show
    /// "current vs suggested" deltas, never to order anything.
    pub fn with_priority_hint(mut self, hint: i64) -> Self {
        self.priority_hint = Some(hint);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dependencies(&self) -> &[UnitId] {
        &self.dependencies
    }

    pub fn action(&self) -> Option<&RunAction> {
        self.action.as_ref()
    }

    pub fn priority_hint(&self) -> Option<i64> {
        self.priority_hint
    }
}
