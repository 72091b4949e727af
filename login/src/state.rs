//! Progress of a login, as seen by the presentation layer.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

/// Whether a login request is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LoginState {
    /// Nothing is running, submit control is enabled.
    #[default]
    Idle,
    /// Waiting for the server, show a spinner.
    InProgress,
}

impl LoginState {
    /// `true` while a request is in flight.
    pub fn is_in_progress(self) -> bool {
        self == LoginState::InProgress
    }
}

/// Published [`LoginState`] plus the number of logins in flight.
///
/// The counter is only touched inside the channel's write lock, so the
/// published state always matches it: [`LoginState::InProgress`] on the
/// first login, [`LoginState::Idle`] once the last one ends.
#[derive(Debug)]
pub(crate) struct Progress {
    state: watch::Sender<LoginState>,
    in_flight: AtomicUsize,
}

impl Progress {
    pub(crate) fn new() -> (Self, watch::Receiver<LoginState>) {
        let (state, receiver) = watch::channel(LoginState::Idle);
        (
            Progress {
                state,
                in_flight: AtomicUsize::new(0),
            },
            receiver,
        )
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    pub(crate) fn current(&self) -> LoginState {
        *self.state.borrow()
    }

    /// Count one more login until the returned guard is dropped.
    pub(crate) fn enter(&self) -> Busy<'_> {
        self.state.send_if_modified(|state| {
            if self.in_flight.fetch_add(1, Ordering::Relaxed) == 0 {
                *state = LoginState::InProgress;
                true
            } else {
                false
            }
        });
        Busy(self)
    }

    fn leave(&self) {
        self.state.send_if_modified(|state| {
            if self.in_flight.fetch_sub(1, Ordering::Relaxed) == 1 {
                *state = LoginState::Idle;
                true
            } else {
                false
            }
        });
    }
}

/// Keeps one login counted until dropped.
///
/// Dropping happens on every exit path, including a cancelled future or a
/// panic.
#[derive(Debug)]
pub(crate) struct Busy<'a>(&'a Progress);

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.0.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn busy_until_dropped() {
        let (progress, receiver) = Progress::new();
        assert_eq!(*receiver.borrow(), LoginState::Idle);

        let busy = progress.enter();
        assert!(receiver.borrow().is_in_progress());

        drop(busy);
        assert_eq!(*receiver.borrow(), LoginState::Idle);
    }

    #[test]
    fn busy_until_last_login_ends() {
        let (progress, receiver) = Progress::new();

        let first = progress.enter();
        let second = progress.enter();
        drop(first);
        assert!(receiver.borrow().is_in_progress());

        let third = progress.enter();
        drop(second);
        assert!(progress.current().is_in_progress());

        drop(third);
        assert_eq!(progress.current(), LoginState::Idle);
    }

    #[test]
    fn idle_after_panic() {
        let (progress, receiver) = Progress::new();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _busy = progress.enter();
            panic!("boom");
        }));

        assert!(result.is_err());
        assert_eq!(*receiver.borrow(), LoginState::Idle);
    }
}
