//! Ordered handler matching for failures.
//!
//! A [`Dispatch`] holds specific handlers (tried in insertion order) and an
//! optional catch-all (always tried last). Running a protected result through
//! it either yields the success value, the value produced by the handler that
//! matched, or hands the failure back when nothing matched so an enclosing
//! scope can deal with it.

use super::{ErrorKind, Failure};

/// Which arm of a [`Dispatch`] handled a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandledBy {
    /// A handler scoped to exactly this kind.
    Specific(ErrorKind),
    /// A handler for any leaf of the custom hierarchy.
    Root,
    /// The catch-all handler.
    CatchAll,
}

/// Result of running a protected region through a [`Dispatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T, R> {
    /// The region finished without failing.
    Completed(T),
    /// The region failed and a handler produced `value`.
    Handled { by: HandledBy, kind: ErrorKind, value: R },
}

impl<T, R> Outcome<T, R> {
    /// Returns the arm that handled the failure, if any.
    pub fn handled_by(&self) -> Option<HandledBy> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Handled { by, .. } => Some(*by),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Matcher {
    Kind(ErrorKind),
    Root,
}

impl Matcher {
    fn matches(&self, kind: ErrorKind) -> bool {
        match self {
            Matcher::Kind(expected) => *expected == kind,
            Matcher::Root => kind.is_custom(),
        }
    }

    fn handled_by(&self) -> HandledBy {
        match self {
            Matcher::Kind(kind) => HandledBy::Specific(*kind),
            Matcher::Root => HandledBy::Root,
        }
    }
}

type Handler<'a, R> = Box<dyn FnOnce(Failure) -> R + 'a>;

/// An ordered chain of failure handlers.
pub struct Dispatch<'a, R> {
    arms: Vec<(Matcher, Handler<'a, R>)>,
    catch_all: Option<Handler<'a, R>>,
}

impl<R> Default for Dispatch<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R> Dispatch<'a, R> {
    /// Creates an empty chain. With no arms every failure propagates.
    pub fn new() -> Self {
        Self {
            arms: Vec::new(),
            catch_all: None,
        }
    }

    /// Adds a handler for one exact kind.
    pub fn on(mut self, kind: ErrorKind, handler: impl FnOnce(Failure) -> R + 'a) -> Self {
        self.arms.push((Matcher::Kind(kind), Box::new(handler)));
        self
    }

    /// Adds a handler matching any leaf of the custom hierarchy.
    pub fn on_root(mut self, handler: impl FnOnce(Failure) -> R + 'a) -> Self {
        self.arms.push((Matcher::Root, Box::new(handler)));
        self
    }

    /// Sets the catch-all handler, replacing any earlier one.
    pub fn catch_all(mut self, handler: impl FnOnce(Failure) -> R + 'a) -> Self {
        self.catch_all = Some(Box::new(handler));
        self
    }

    /// Runs `result` through the chain.
    ///
    /// Returns `Err(failure)` when no arm matched and there is no catch-all.
    pub fn run<T>(self, result: Result<T, Failure>) -> Result<Outcome<T, R>, Failure> {
        let failure = match result {
            Ok(value) => return Ok(Outcome::Completed(value)),
            Err(failure) => failure,
        };
        let kind = failure.kind();

        if let Some((matcher, handler)) = self
            .arms
            .into_iter()
            .find(|(matcher, _)| matcher.matches(kind))
        {
            let by = matcher.handled_by();
            tracing::debug!(kind = kind.name(), arm = ?by, "failure handled");
            return Ok(Outcome::Handled {
                by,
                kind,
                value: handler(failure),
            });
        }

        match self.catch_all {
            Some(handler) => {
                tracing::debug!(kind = kind.name(), "failure handled by catch-all");
                Ok(Outcome::Handled {
                    by: HandledBy::CatchAll,
                    kind,
                    value: handler(failure),
                })
            }
            None => {
                tracing::debug!(kind = kind.name(), "no handler matched, propagating");
                Err(failure)
            }
        }
    }
}
