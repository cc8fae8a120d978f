// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Time-bounded holder for an expensive handle (an access token).
//!
//! The value is created lazily on first use and kept until its expiry
//! passes or [`TtlCell::invalidate`] is called; the next access then
//! recreates it.

use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

pub struct TtlCell<T> {
    ttl: Duration,
    entry: Mutex<Option<Entry<T>>>,
}

impl<T: Clone> TtlCell<T> {
    /// Create an empty cell whose entries live at most `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the held value, or create one with `init` if the cell is empty
    /// or expired.
    ///
    /// `init` may return its own lifetime (e.g. a token's `expires_in`); the
    /// entry then lives for the shorter of that and the cell's ttl. A failed
    /// `init` leaves the cell empty.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<(T, Option<Duration>), E>,
    {
        let mut guard = self.entry.lock().unwrap_or_else(|p| p.into_inner());
        let now = Instant::now();

        if let Some(entry) = guard.as_ref() {
            if now < entry.expires_at {
                return Ok(entry.value.clone());
            }
        }
        *guard = None;

        let (value, lifetime) = init()?;
        let lifetime = lifetime.map_or(self.ttl, |l| l.min(self.ttl));
        *guard = Some(Entry {
            value: value.clone(),
            expires_at: now + lifetime,
        });
        Ok(value)
    }

    /// Drop the held value so the next access recreates it
    pub fn invalidate(&self) {
        let mut guard = self.entry.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// True while a value is held and has not expired
    pub fn is_fresh(&self) -> bool {
        let guard = self.entry.lock().unwrap_or_else(|p| p.into_inner());
        guard
            .as_ref()
            .is_some_and(|entry| Instant::now() < entry.expires_at)
    }
}
