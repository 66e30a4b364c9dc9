//! Append-only diagnostic accumulation.
//!
//! A [`DiagnosticBag`] collects the diagnostics of one phase in the order
//! they were raised. It never reorders, never deduplicates and never drops:
//! two identical diagnostics at the same location are both kept. Consumers
//! copy out ([`DiagnosticBag::to_vec`]) or take ownership
//! ([`DiagnosticBag::drain`], [`DiagnosticBag::into_vec`]).
//!
//! Bags are single-owner. A worker appends to its own bag and hands it back
//! to be merged with [`DiagnosticBag::extend`].

use parking_lot::Mutex;

use crate::{Diagnostic, DiagnosticInfo, ErrorCode, Location};

/// Ordered, append-only collection of diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        DiagnosticBag::default()
    }

    /// Create an info for `code`, append it at `location` and return it so
    /// the caller can decorate it further.
    pub fn add<I, S>(&mut self, code: ErrorCode, location: Location, args: I) -> DiagnosticInfo
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let info = DiagnosticInfo::new(code, args);
        self.add_info(info.clone(), location);
        info
    }

    pub fn add_info(&mut self, info: DiagnosticInfo, location: Location) {
        self.diagnostics.push(Diagnostic::new(info, location));
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append every diagnostic of `other`, preserving order.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(other);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Any unsuppressed error-severity diagnostic.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.is_error() && !d.is_suppressed())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Copy of the current contents.
    pub fn to_vec(&self) -> Vec<Diagnostic> {
        self.diagnostics.clone()
    }

    /// Take every diagnostic out, leaving the bag empty and reusable.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

/// Pool of empty bags for hot paths that create many short-lived bags.
///
/// [`DiagnosticBagPool::get`] hands out ownership; the holder is the only
/// writer until it calls [`DiagnosticBagPool::release`].
#[derive(Debug)]
pub struct DiagnosticBagPool {
    free: Mutex<Vec<DiagnosticBag>>,
    capacity: usize,
}

impl DiagnosticBagPool {
    /// Retained bags above `capacity` are dropped on release.
    pub fn new(capacity: usize) -> Self {
        DiagnosticBagPool {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// An empty bag, reused if one is available.
    pub fn get(&self) -> DiagnosticBag {
        self.free.lock().pop().unwrap_or_default()
    }

    /// Return a bag to the pool. Its contents are discarded.
    pub fn release(&self, mut bag: DiagnosticBag) {
        bag.diagnostics.clear();
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(bag);
        }
    }

    /// Bags currently waiting for reuse.
    pub fn available(&self) -> usize {
        self.free.lock().len()
    }
}

impl Default for DiagnosticBagPool {
    fn default() -> Self {
        DiagnosticBagPool::new(16)
    }
}

#[cfg(test)]
mod tests;
