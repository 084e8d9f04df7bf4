//! Session lifecycle: the inactivity monitor, the logout coordinator and the
//! channel types that connect them to the HTTP adapter and the embedding
//! shell. Ending a session always converges on the coordinator task, no
//! matter which of the three triggers fired first.

pub mod coordinator;
pub mod inactivity;

use tokio::sync::mpsc;

/// Why a session is being torn down.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogoutTrigger {
    /// The user asked to log out.
    UserRequested,
    /// The inactivity monitor expired without seeing activity.
    Inactivity,
    /// The server rejected the credentials with a 401.
    Unauthorized,
}

impl LogoutTrigger {
    /// Human-readable trigger name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogoutTrigger::UserRequested => "user_requested",
            LogoutTrigger::Inactivity => "inactivity",
            LogoutTrigger::Unauthorized => "unauthorized",
        }
    }
}

/// User-visible notices emitted while tearing a session down. The shell
/// decides how to render them; only the inactivity case is distinguished.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Notice {
    InactivityLogout,
}

impl Notice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Notice::InactivityLogout => {
                "Your session has expired due to inactivity. Please login again."
            }
        }
    }
}

/// Cheap handle for requesting session teardown from anywhere in the stack.
#[derive(Clone)]
pub struct SessionHandle {
    triggers: mpsc::UnboundedSender<LogoutTrigger>,
}

impl SessionHandle {
    /// Creates the handle and the receiving end the coordinator drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LogoutTrigger>) {
        let (triggers, rx) = mpsc::unbounded_channel();
        (Self { triggers }, rx)
    }

    /// Queues a teardown request. Safe to call repeatedly and concurrently;
    /// the coordinator serializes the work and every step is idempotent.
    pub fn end_session(&self, trigger: LogoutTrigger) {
        // A closed channel means the shell is already tearing down.
        let _ = self.triggers.send(trigger);
    }
}

/// Outbound hooks into the embedding shell: forced navigation and notices.
#[derive(Clone)]
pub struct SessionHooks {
    navigations: mpsc::UnboundedSender<&'static str>,
    notices: mpsc::UnboundedSender<Notice>,
}

impl SessionHooks {
    #[must_use]
    pub fn new(
        navigations: mpsc::UnboundedSender<&'static str>,
        notices: mpsc::UnboundedSender<Notice>,
    ) -> Self {
        Self {
            navigations,
            notices,
        }
    }

    /// Asks the shell to navigate to the named route.
    pub fn redirect(&self, route: &'static str) {
        let _ = self.navigations.send(route);
    }

    /// Surfaces a user-visible notice.
    pub fn notify(&self, notice: Notice) {
        let _ = self.notices.send(notice);
    }
}
