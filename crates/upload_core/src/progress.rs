use crate::{Liveness, UploadTask};

/// How a progress row should be decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStatus {
    /// Fully received.
    Success,
    /// Incomplete and the local engine is transferring it.
    Active,
    /// Incomplete, held locally but paused.
    Neutral,
    /// Incomplete and nothing local is driving it.
    Exception,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub status: DisplayStatus,
}

/// Whole percent received, floored and clamped to `0..=100`.
///
/// An empty upload counts as complete.
pub fn percent(received: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let scaled = u128::from(received) * 100 / u128::from(total);
    scaled.min(100) as u8
}

pub fn display_status(percent: u8, liveness: Option<Liveness>) -> DisplayStatus {
    if percent >= 100 {
        return DisplayStatus::Success;
    }
    match liveness {
        None => DisplayStatus::Exception,
        Some(l) if l.is_running() => DisplayStatus::Active,
        Some(_) => DisplayStatus::Neutral,
    }
}

pub fn progress(task: &UploadTask, liveness: Option<Liveness>) -> Progress {
    let percent = percent(task.received, task.size);
    Progress {
        percent,
        status: display_status(percent, liveness),
    }
}
