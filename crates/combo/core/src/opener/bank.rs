use super::{Opener, OpenerScript};
use crate::context::ComboContext;

/// Index of an opener inside an [`OpenerBank`].
///
/// Rule sets hold handles instead of openers so that all cursor state lives
/// in one place owned by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OpenerHandle(usize);

impl OpenerHandle {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Arena of openers owned by one engine.
#[derive(Debug, Default)]
pub struct OpenerBank {
    openers: Vec<Opener>,
}

impl OpenerBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, script: OpenerScript) -> OpenerHandle {
        let handle = OpenerHandle(self.openers.len());
        self.openers.push(Opener::new(script));
        handle
    }

    pub fn get(&self, handle: OpenerHandle) -> Option<&Opener> {
        self.openers.get(handle.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OpenerHandle, &Opener)> {
        self.openers
            .iter()
            .enumerate()
            .map(|(index, opener)| (OpenerHandle(index), opener))
    }

    /// Feeds the tick boundary to every opener.
    pub fn observe(&self, ctx: &ComboContext<'_>) {
        for opener in &self.openers {
            opener.observe(ctx);
        }
    }

    /// Returns every opener to `PreOpener`, starting a new pull generation.
    pub fn reset_all(&self) {
        for opener in &self.openers {
            opener.reset();
        }
    }

    pub fn len(&self) -> usize {
        self.openers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.openers.is_empty()
    }
}
