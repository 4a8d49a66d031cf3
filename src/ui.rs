//! Collaborator capabilities injected into components
//!
//! Components never present anything themselves. Notifications, blocking
//! confirmations and navigation go through these traits so that a terminal,
//! a GUI shell or a test double can provide them.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::route::Route;

/// How long informational notifications stay on screen
pub const SUCCESS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

impl NotificationKind {
    /// Errors stay until dismissed; everything else auto-dismisses
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            NotificationKind::Error => None,
            NotificationKind::Success | NotificationKind::Info => Some(SUCCESS_TIMEOUT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn timeout(&self) -> Option<Duration> {
        self.kind.timeout()
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, title: &str, body: &str);

    fn success(&self, body: &str) {
        self.notify(NotificationKind::Success, "", body);
    }

    fn error(&self, title: &str, body: &str) {
        self.notify(NotificationKind::Error, title, body);
    }
}

/// Blocking user confirmation (modal dialog or prompt)
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Notifier that keeps every notification, for shells that render a list
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries().pop()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, kind: NotificationKind, title: &str, body: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Notification {
                kind,
                title: title.to_string(),
                body: body.to_string(),
            });
        }
    }
}

/// Navigator that records the route history
#[derive(Debug, Default)]
pub struct NavigationHistory {
    routes: Mutex<Vec<Route>>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_default()
    }

    pub fn current(&self) -> Option<Route> {
        self.routes().pop()
    }
}

impl Navigator for NavigationHistory {
    fn navigate(&self, route: Route) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }
}

/// Confirmer with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl Confirmer for FixedAnswer {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
