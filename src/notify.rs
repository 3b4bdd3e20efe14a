use std::io::{self, Write};
use std::thread;

use clap::ValueEnum;
use notify_rust::Notification;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::session::Phase;

const ASCII_BELL: &[u8] = b"\x07";

/// Receives one call per expired phase.
/// `entering` is the phase the timer is switching to.
pub trait Notifier {
    fn notify(&mut self, entering: Phase) -> Result<()>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, entering: Phase) -> Result<()> {
        (**self).notify(entering)
    }
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationMode {
    Bell,
    Desktop,
    None,
}

impl NotificationMode {
    pub fn notifier(self) -> Box<dyn Notifier> {
        match self {
            NotificationMode::Bell => Box::new(BellNotifier::default()),
            NotificationMode::Desktop => Box::new(Background::new(DesktopNotifier::default())),
            NotificationMode::None => Box::new(SilentNotifier),
        }
    }
}

fn message_for(entering: Phase) -> &'static str {
    match entering {
        Phase::Focusing => "Break is over, back to focus",
        Phase::OnBreak => "Focus session done, take a break",
    }
}

/// Rings the terminal bell
#[derive(Debug, Default, Clone)]
pub struct BellNotifier;

impl BellNotifier {
    fn ring(&self) -> Result<()> {
        let mut out = io::stdout();
        out.write_all(ASCII_BELL)?;
        out.flush()?;
        Ok(())
    }
}

impl Notifier for BellNotifier {
    fn notify(&mut self, _entering: Phase) -> Result<()> {
        self.ring()
    }
}

/// Desktop notification with a bell fallback. Blocks on the notification
/// daemon, so run it through [`Background`].
#[derive(Debug, Default, Clone)]
pub struct DesktopNotifier {
    bell: BellNotifier,
}

impl Notifier for DesktopNotifier {
    fn notify(&mut self, entering: Phase) -> Result<()> {
        let shown = Notification::new()
            .summary("tomat")
            .body(message_for(entering))
            .appname("tomat")
            .show();

        match shown {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(%err, "desktop notification unavailable, ringing bell");
                self.bell
                    .ring()
                    .map_err(|bell_err| Error::Notify(format!("{err}; {bell_err}")))
            }
        }
    }
}

/// Runs the wrapped notifier on its own thread and returns immediately.
/// Failures are logged there; the caller never waits on delivery.
#[derive(Debug, Clone)]
pub struct Background<N> {
    inner: N,
}

impl<N> Background<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

impl<N: Notifier + Clone + Send + 'static> Notifier for Background<N> {
    fn notify(&mut self, entering: Phase) -> Result<()> {
        let mut inner = self.inner.clone();
        thread::Builder::new()
            .name("tomat-notify".into())
            .spawn(move || {
                if let Err(err) = inner.notify(entering) {
                    tracing::warn!(%err, phase = %entering, "notification failed");
                }
            })?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _entering: Phase) -> Result<()> {
        Ok(())
    }
}
