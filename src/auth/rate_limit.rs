use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const MAX_ATTEMPTS: u32 = 5;
pub const WINDOW_SECS: u64 = 900; // 15 minutes

/// Failed attempts counted since `started`. The window is fixed, not sliding.
#[derive(Debug, Clone, Copy)]
struct AttemptWindow {
    count: u32,
    started: Instant,
}

/// What the login form needs to know about an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThrottleStatus {
    pub attempts: u32,
    pub locked: bool,
    pub retry_after_secs: u64,
}

/// Per-IP failed-login limiter shared across workers.
#[derive(Clone)]
pub struct RateLimiter {
    attempts: Arc<Mutex<HashMap<IpAddr, AttemptWindow>>>,
    max_attempts: u32,
    window: Duration,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, Duration::from_secs(WINDOW_SECS))
    }
}

impl RateLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(HashMap::new())),
            max_attempts: max_attempts.max(1),
            window,
        }
    }

    pub fn status(&self, ip: IpAddr) -> ThrottleStatus {
        self.status_at(ip, Instant::now())
    }

    /// Current throttle state for `ip`. An elapsed window is dropped here.
    pub fn status_at(&self, ip: IpAddr, now: Instant) -> ThrottleStatus {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let Some(entry) = map.get(&ip).copied() else {
            return ThrottleStatus::default();
        };

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            map.remove(&ip);
            return ThrottleStatus::default();
        }

        let locked = entry.count >= self.max_attempts;
        ThrottleStatus {
            attempts: entry.count,
            locked,
            retry_after_secs: if locked { (self.window - elapsed).as_secs().max(1) } else { 0 },
        }
    }

    pub fn record_failure(&self, ip: IpAddr) -> ThrottleStatus {
        self.record_failure_at(ip, Instant::now())
    }

    /// Record a failed login attempt. The first failure after an elapsed window opens a new one.
    pub fn record_failure_at(&self, ip: IpAddr, now: Instant) -> ThrottleStatus {
        {
            let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
            let entry = map.entry(ip).or_insert(AttemptWindow { count: 0, started: now });
            if now.saturating_duration_since(entry.started) >= self.window {
                *entry = AttemptWindow { count: 0, started: now };
            }
            entry.count += 1;
        }
        self.status_at(ip, now)
    }

    /// Clear all recorded attempts for the given IP (call on successful login).
    pub fn clear(&self, ip: IpAddr) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&ip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const IP: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const OTHER: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn locks_after_five_failures_within_window() {
        let limiter = RateLimiter::default();
        let start = Instant::now();
        for i in 0..4 {
            let status = limiter.record_failure_at(IP, start + Duration::from_secs(i * 60));
            assert!(!status.locked, "locked too early at attempt {}", i + 1);
        }
        let status = limiter.record_failure_at(IP, start + Duration::from_secs(300));
        assert!(status.locked);
        assert_eq!(status.attempts, 5);
        assert_eq!(status.retry_after_secs, 600);
        assert!(!limiter.status_at(OTHER, start).locked);
    }

    #[test]
    fn counter_resets_after_window() {
        let limiter = RateLimiter::default();
        let start = Instant::now();
        for _ in 0..5 {
            limiter.record_failure_at(IP, start);
        }
        assert!(limiter.status_at(IP, start + Duration::from_secs(899)).locked);

        let later = start + Duration::from_secs(WINDOW_SECS);
        let status = limiter.status_at(IP, later);
        assert_eq!(status, ThrottleStatus::default());

        let status = limiter.record_failure_at(IP, later);
        assert_eq!(status.attempts, 1);
        assert!(!status.locked);
    }

    #[test]
    fn clear_forgets_the_address() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let now = Instant::now();
        limiter.record_failure_at(IP, now);
        limiter.record_failure_at(IP, now);
        assert!(limiter.status_at(IP, now).locked);
        limiter.clear(IP);
        assert_eq!(limiter.status_at(IP, now).attempts, 0);
    }
}
