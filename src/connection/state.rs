//! Connection states and read-only snapshots.

use std::fmt;

/// State of a [`PrinterConnection`](super::PrinterConnection).
///
/// Each variant carries exactly the handles that are valid in it, so a
/// ready connection without a channel cannot be represented.
///
/// ```text
/// Idle → Discovering → Connecting → ScanningChannels → Ready
///                  \          \              \
///                   → Failed  → Failed        → Failed
/// ```
#[derive(Debug, Clone)]
pub enum ConnectionState<D, L, C> {
    /// Constructed, `connect()` not yet called.
    Idle,
    /// Waiting for device discovery.
    Discovering,
    /// Device selected, opening the GATT link.
    Connecting { device: D },
    /// Link open, enumerating services and characteristics.
    ScanningChannels { device: D, link: L },
    /// A writable channel was selected.
    Ready { device: D, link: L, channel: C },
    /// The last `connect()` stopped at a failing step.
    ///
    /// Handles acquired by the steps before the failure are kept.
    Failed { device: Option<D>, link: Option<L> },
}

impl<D, L, C> ConnectionState<D, L, C> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// Short state name for logs and status output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Discovering => "discovering",
            Self::Connecting { .. } => "connecting",
            Self::ScanningChannels { .. } => "scanning_channels",
            Self::Ready { .. } => "ready",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn device(&self) -> Option<&D> {
        match self {
            Self::Connecting { device }
            | Self::ScanningChannels { device, .. }
            | Self::Ready { device, .. } => Some(device),
            Self::Failed { device, .. } => device.as_ref(),
            Self::Idle | Self::Discovering => None,
        }
    }

    pub fn link(&self) -> Option<&L> {
        match self {
            Self::ScanningChannels { link, .. } | Self::Ready { link, .. } => Some(link),
            Self::Failed { link, .. } => link.as_ref(),
            _ => None,
        }
    }

    pub fn channel(&self) -> Option<&C> {
        match self {
            Self::Ready { channel, .. } => Some(channel),
            _ => None,
        }
    }

    /// Move into `Failed`, keeping whatever handles are held.
    pub(crate) fn into_failed(self) -> Self {
        match self {
            Self::Connecting { device } => Self::Failed {
                device: Some(device),
                link: None,
            },
            Self::ScanningChannels { device, link } | Self::Ready { device, link, .. } => {
                Self::Failed {
                    device: Some(device),
                    link: Some(link),
                }
            }
            Self::Failed { device, link } => Self::Failed { device, link },
            Self::Idle | Self::Discovering => Self::Failed {
                device: None,
                link: None,
            },
        }
    }
}

impl<D, L, C> Default for ConnectionState<D, L, C> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<D, L, C> fmt::Display for ConnectionState<D, L, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owned copy of the observable connection state.
///
/// Handles are clones; mutating the snapshot never affects the connection.
#[derive(Debug, Clone)]
pub struct StateSnapshot<D, L, C> {
    pub device: Option<D>,
    pub link: Option<L>,
    pub channel: Option<C>,
    pub ready: bool,
    pub last_error: Option<String>,
}
