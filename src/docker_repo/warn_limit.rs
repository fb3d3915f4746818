// Per-key rate limit for repeated failure warnings.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub(crate) struct WarnLimiter {
    interval: Duration,
    last_warned: HashMap<String, Instant>,
}

impl WarnLimiter {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_warned: HashMap::new(),
        }
    }

    /// True at most once per `interval` for the same key.
    pub(crate) fn should_warn(&mut self, key: &str, now: Instant) -> bool {
        match self.last_warned.get(key) {
            Some(t) if now.saturating_duration_since(*t) < self.interval => false,
            _ => {
                self.last_warned.insert(key.to_string(), now);
                true
            }
        }
    }

    /// Forgets keys not in `live`.
    pub(crate) fn retain(&mut self, live: &HashSet<&str>) {
        self.last_warned.retain(|k, _| live.contains(k.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warns_once_per_interval_per_key() {
        let mut limiter = WarnLimiter::new(Duration::from_secs(30));
        let t0 = Instant::now();
        assert!(limiter.should_warn("a", t0));
        assert!(!limiter.should_warn("a", t0 + Duration::from_secs(1)));
        assert!(!limiter.should_warn("a", t0 + Duration::from_secs(29)));
        assert!(limiter.should_warn("b", t0 + Duration::from_secs(1)));
        assert!(limiter.should_warn("a", t0 + Duration::from_secs(30)));
    }

    #[test]
    fn retain_forgets_vanished_keys() {
        let mut limiter = WarnLimiter::new(Duration::from_secs(30));
        let t0 = Instant::now();
        limiter.should_warn("a", t0);
        limiter.should_warn("b", t0);
        limiter.retain(&HashSet::from(["b"]));
        assert!(limiter.should_warn("a", t0 + Duration::from_secs(1)));
        assert!(!limiter.should_warn("b", t0 + Duration::from_secs(1)));
    }
}
