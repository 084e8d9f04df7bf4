//! Inactivity monitor: a countdown state machine driven by user-activity
//! events, with an optional warning phase before expiry.
//!
//! The machine itself is pure (instants in, transitions out); a tokio task
//! owns it and feeds it the clock. Tracked activity restarts the cycle,
//! expiry hands `LogoutTrigger::Inactivity` to the session coordinator, and
//! the `Expired` phase is terminal until an explicit reset. Dropping every
//! handle stops the task, so no timer outlives its owner.

use crate::errors::ConfigError;
use crate::session::{LogoutTrigger, SessionHandle};
use std::str::FromStr;
use std::time::Duration;
use tokio::{
    select,
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{Instant, sleep_until},
};
use tracing::{debug, info};

const WARNING_TICK: Duration = Duration::from_secs(1);

/// User-input events counted as liveness signals.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActivityKind {
    PointerMove,
    KeyPress,
    Click,
    Scroll,
    TouchStart,
}

impl ActivityKind {
    /// The default tracked set: pointer movement, key presses, clicks,
    /// scrolling and touch.
    #[must_use]
    pub fn defaults() -> Vec<ActivityKind> {
        vec![
            ActivityKind::PointerMove,
            ActivityKind::KeyPress,
            ActivityKind::Click,
            ActivityKind::Scroll,
            ActivityKind::TouchStart,
        ]
    }
}

impl FromStr for ActivityKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pointermove" | "mousemove" => Ok(ActivityKind::PointerMove),
            "keypress" | "keydown" => Ok(ActivityKind::KeyPress),
            "click" => Ok(ActivityKind::Click),
            "scroll" => Ok(ActivityKind::Scroll),
            "touchstart" => Ok(ActivityKind::TouchStart),
            other => Err(ConfigError::UnknownActivityKind(other.to_string())),
        }
    }
}

/// Monitor timings and the tracked activity set.
#[derive(Clone, Debug)]
pub struct InactivityConfig {
    timeout: Duration,
    warning: Option<Duration>,
    tracked: Vec<ActivityKind>,
}

impl InactivityConfig {
    /// Validates the timings. A warning lead of zero disables the warning
    /// phase; a lead at or beyond the timeout is a configuration error.
    pub fn new(
        timeout: Duration,
        warning: Option<Duration>,
        tracked: Vec<ActivityKind>,
    ) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "inactivity timeout",
                value: "0s".to_string(),
            });
        }

        let warning = warning.filter(|lead| !lead.is_zero());
        if let Some(lead) = warning {
            if lead >= timeout {
                return Err(ConfigError::WarningNotBeforeTimeout {
                    warning: lead,
                    timeout,
                });
            }
        }

        Ok(Self {
            timeout,
            warning,
            tracked,
        })
    }

    #[must_use]
    pub fn tracks(&self, kind: ActivityKind) -> bool {
        self.tracked.contains(&kind)
    }
}

/// Observable monitor state, published over a watch channel for the shell's
/// warning dialog and for tests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MonitorStatus {
    Counting,
    Warning { remaining_secs: u64 },
    Expired,
}

enum Phase {
    Counting,
    Warning {
        remaining_secs: u64,
        next_tick: Instant,
    },
    Expired,
}

/// The pure countdown: no timers, no channels, just instants.
struct Countdown {
    timeout: Duration,
    warning: Option<Duration>,
    deadline: Instant,
    phase: Phase,
}

impl Countdown {
    fn new(config: &InactivityConfig, now: Instant) -> Self {
        Self {
            timeout: config.timeout,
            warning: config.warning,
            deadline: now + config.timeout,
            phase: Phase::Counting,
        }
    }

    /// Restarts the full cycle from `now`, also leaving `Expired`.
    fn reset(&mut self, now: Instant) {
        self.deadline = now + self.timeout;
        self.phase = Phase::Counting;
    }

    /// Activity restarts a live cycle; once expired only `reset` revives it.
    fn record_activity(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Expired => false,
            _ => {
                self.reset(now);
                true
            }
        }
    }

    /// The next instant the driver must wake at, or `None` when expired.
    fn next_wake(&self) -> Option<Instant> {
        match &self.phase {
            Phase::Counting => Some(match self.warning {
                Some(lead) => self.deadline - lead,
                None => self.deadline,
            }),
            Phase::Warning { next_tick, .. } => Some((*next_tick).min(self.deadline)),
            Phase::Expired => None,
        }
    }

    /// Applies every transition due at `now`. Returns true when the logout
    /// deadline was crossed by this call.
    fn advance(&mut self, now: Instant) -> bool {
        loop {
            match &mut self.phase {
                Phase::Counting => {
                    let Some(lead) = self.warning else {
                        if now >= self.deadline {
                            self.phase = Phase::Expired;
                            return true;
                        }
                        return false;
                    };
                    let warn_at = self.deadline - lead;
                    if now < warn_at {
                        return false;
                    }
                    self.phase = Phase::Warning {
                        remaining_secs: lead.as_secs(),
                        next_tick: warn_at + WARNING_TICK,
                    };
                }
                Phase::Warning {
                    remaining_secs,
                    next_tick,
                } => {
                    if now >= self.deadline {
                        self.phase = Phase::Expired;
                        return true;
                    }
                    if now < *next_tick {
                        return false;
                    }
                    *remaining_secs = remaining_secs.saturating_sub(1);
                    *next_tick += WARNING_TICK;
                }
                Phase::Expired => return false,
            }
        }
    }

    fn status(&self) -> MonitorStatus {
        match &self.phase {
            Phase::Counting => MonitorStatus::Counting,
            Phase::Warning { remaining_secs, .. } => MonitorStatus::Warning {
                remaining_secs: *remaining_secs,
            },
            Phase::Expired => MonitorStatus::Expired,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Activity(ActivityKind),
    Reset,
    Shutdown,
}

/// Handle for feeding activity into the monitor and observing its state.
#[derive(Clone)]
pub struct MonitorHandle {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<MonitorStatus>,
}

impl MonitorHandle {
    /// Reports a user-input event. Untracked kinds are dropped by the driver.
    pub fn record_activity(&self, kind: ActivityKind) {
        let _ = self.commands.send(Command::Activity(kind));
    }

    /// Explicitly restarts the countdown, including out of `Expired`.
    pub fn reset(&self) {
        let _ = self.commands.send(Command::Reset);
    }

    /// Stops the driver task; pending timers die with it.
    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    #[must_use]
    pub fn status(&self) -> MonitorStatus {
        self.status.borrow().clone()
    }

    /// Watch stream of status changes, for warning dialogs and countdowns.
    #[must_use]
    pub fn status_stream(&self) -> watch::Receiver<MonitorStatus> {
        self.status.clone()
    }

    #[cfg(test)]
    pub(crate) fn detached() -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (commands, rx) = mpsc::unbounded_channel();
        let (_status_tx, status) = watch::channel(MonitorStatus::Counting);
        (Self { commands, status }, rx)
    }
}

pub struct InactivityMonitor;

impl InactivityMonitor {
    /// Spawns the driver task. Expiry sends `LogoutTrigger::Inactivity`
    /// through `session`; the task exits when every handle is gone or
    /// `shutdown` is called.
    #[must_use]
    pub fn spawn(config: InactivityConfig, session: SessionHandle) -> (MonitorHandle, JoinHandle<()>) {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(MonitorStatus::Counting);
        let task = tokio::spawn(run(config, session, command_rx, status_tx));
        (
            MonitorHandle {
                commands,
                status: status_rx,
            },
            task,
        )
    }
}

async fn run(
    config: InactivityConfig,
    session: SessionHandle,
    mut commands: mpsc::UnboundedReceiver<Command>,
    status: watch::Sender<MonitorStatus>,
) {
    let mut countdown = Countdown::new(&config, Instant::now());

    loop {
        publish(&status, &countdown);

        select! {
            command = commands.recv() => match command {
                None | Some(Command::Shutdown) => break,
                Some(Command::Activity(kind)) => {
                    if config.tracks(kind) && countdown.record_activity(Instant::now()) {
                        debug!(kind = ?kind, "activity reset");
                    }
                }
                Some(Command::Reset) => countdown.reset(Instant::now()),
            },
            () = wake_after(countdown.next_wake()) => {
                if countdown.advance(Instant::now()) {
                    info!("inactivity timeout reached");
                    session.end_session(LogoutTrigger::Inactivity);
                }
            }
        }
    }
    // Dropping the receiver here detaches every activity source; no timer
    // survives the task.
}

async fn wake_after(at: Option<Instant>) {
    match at {
        Some(at) => sleep_until(at).await,
        // Expired: nothing left to time, wait for a command.
        None => std::future::pending().await,
    }
}

fn publish(status: &watch::Sender<MonitorStatus>, countdown: &Countdown) {
    status.send_if_modified(|current| {
        let next = countdown.status();
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}
