use chrono::{DateTime, Utc};
use std::ops::Add;
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::{Duration, SystemTime};

pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;

    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.now())
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Settable clock for deterministic date math in tests.
#[derive(Debug)]
pub struct MockClock {
    now: RwLock<SystemTime>,
}

impl Clock for MockClock {
    fn now(&self) -> SystemTime {
        match self.now.read() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl MockClock {
    pub fn with_time(time: SystemTime) -> Self {
        Self {
            now: RwLock::new(time),
        }
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::with_time(SystemTime::from(instant))
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.write();
        *now = now.add(duration);
    }

    pub fn set_time(&self, time: SystemTime) {
        *self.write() = time;
    }

    fn write(&self) -> RwLockWriteGuard<'_, SystemTime> {
        match self.now.write() {
            Ok(now) => now,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
