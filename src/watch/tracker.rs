// src/watch/tracker.rs

//! Stability tracking across successive scans.
//!
//! For each path the tracker remembers the modification time seen on the
//! previous tick. A path is reported as stable when:
//! - it was already known on an earlier tick (never on first sighting),
//! - its modification time is identical to the one recorded last tick,
//! - at least `window` of wall-clock time has passed since that time,
//! - it has not been reported before.
//!
//! Reported paths go into a seen-set that is never pruned, so a path is
//! reported at most once for the lifetime of the tracker even if the file is
//! rewritten later.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, trace};

use crate::types::FileObservation;

#[derive(Debug)]
pub struct StabilityTracker {
    window: Duration,
    forget_missing: bool,
    /// Last observed modification time per path.
    candidates: HashMap<PathBuf, SystemTime>,
    /// Paths already reported as stable.
    seen: HashSet<PathBuf>,
}

impl StabilityTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            forget_missing: false,
            candidates: HashMap::new(),
            seen: HashSet::new(),
        }
    }

    /// Drop candidate state for paths that are absent from a scan.
    ///
    /// The seen-set is unaffected, so a file that disappears and comes back
    /// after being reported is still not reported again.
    pub fn with_forget_missing(mut self, forget_missing: bool) -> Self {
        self.forget_missing = forget_missing;
        self
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn is_seen(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Take back a report that was never delivered.
    ///
    /// The candidate record is kept, so an unchanged file is reported again
    /// on the next tick that observes it.
    pub fn unmark(&mut self, path: &Path) -> bool {
        self.seen.remove(path)
    }

    /// Feed one scan and return the paths that became stable on this tick,
    /// in scan order.
    pub fn observe(&mut self, scan: &[FileObservation], now: SystemTime) -> Vec<PathBuf> {
        let mut stable = Vec::new();

        for obs in scan {
            match self.candidates.get_mut(&obs.path) {
                None => {
                    trace!(path = ?obs.path, "first sighting");
                    self.candidates.insert(obs.path.clone(), obs.modified);
                }
                Some(last) if *last != obs.modified => {
                    trace!(path = ?obs.path, "modification time changed; restarting window");
                    *last = obs.modified;
                }
                Some(_) => {
                    if self.seen.contains(&obs.path) {
                        continue;
                    }
                    // A modification time in the future counts as no time elapsed.
                    let elapsed = now.duration_since(obs.modified).unwrap_or(Duration::ZERO);
                    if elapsed >= self.window {
                        debug!(path = ?obs.path, ?elapsed, "file held still for the stability window");
                        self.seen.insert(obs.path.clone());
                        stable.push(obs.path.clone());
                    }
                }
            }
        }

        if self.forget_missing && self.candidates.len() > scan.len() {
            let present: HashSet<&Path> = scan.iter().map(|o| o.path.as_path()).collect();
            let before = self.candidates.len();
            self.candidates.retain(|path, _| present.contains(path.as_path()));
            debug!(forgotten = before - self.candidates.len(), "dropped state for missing files");
        }

        stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn at(secs: f64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs_f64(10_000.0 + secs)
    }

    fn obs(path: &str, modified: SystemTime) -> FileObservation {
        FileObservation::new(path, modified)
    }

    #[test]
    fn old_file_is_not_stable_on_first_sighting() {
        let mut tracker = StabilityTracker::new(Duration::from_secs(2));
        let ancient = at(-3600.0);

        assert!(tracker.observe(&[obs("a", ancient)], at(0.0)).is_empty());
        assert_eq!(tracker.observe(&[obs("a", ancient)], at(1.0)), vec![PathBuf::from("a")]);
    }

    #[test]
    fn unchanged_but_too_recent_is_not_stable() {
        let mut tracker = StabilityTracker::new(Duration::from_secs(5));
        let m = at(0.0);

        tracker.observe(&[obs("a", m)], at(1.0));
        assert!(tracker.observe(&[obs("a", m)], at(2.0)).is_empty());
        assert!(tracker.observe(&[obs("a", m)], at(4.9)).is_empty());
        assert_eq!(tracker.observe(&[obs("a", m)], at(5.0)).len(), 1);
    }

    #[test]
    fn future_mtime_counts_as_zero_elapsed() {
        let mut tracker = StabilityTracker::new(Duration::from_secs(1));
        let m = at(100.0);

        tracker.observe(&[obs("a", m)], at(0.0));
        assert!(tracker.observe(&[obs("a", m)], at(1.0)).is_empty());
    }

    #[test]
    fn absent_files_keep_their_state_by_default() {
        let mut tracker = StabilityTracker::new(Duration::from_secs(1));
        let m = at(0.0);

        tracker.observe(&[obs("a", m)], at(1.0));
        tracker.observe(&[], at(2.0));
        assert_eq!(tracker.candidate_count(), 1);
        // Still remembered, so reappearing unchanged is stable right away.
        assert_eq!(tracker.observe(&[obs("a", m)], at(3.0)).len(), 1);
    }

    #[test]
    fn forget_missing_drops_candidates_but_not_seen() {
        let mut tracker = StabilityTracker::new(Duration::from_secs(1)).with_forget_missing(true);
        let m = at(0.0);

        tracker.observe(&[obs("a", m), obs("b", m)], at(1.0));
        assert_eq!(tracker.observe(&[obs("a", m), obs("b", m)], at(2.0)).len(), 2);

        tracker.observe(&[obs("c", m)], at(3.0));
        assert_eq!(tracker.candidate_count(), 1);
        assert_eq!(tracker.seen_count(), 2);

        // "a" returns: first sighting again, then already seen.
        assert!(tracker.observe(&[obs("a", m)], at(4.0)).is_empty());
        assert!(tracker.observe(&[obs("a", m)], at(5.0)).is_empty());
    }

    #[test]
    fn unmarked_path_is_reported_again_on_next_tick() {
        let mut tracker = StabilityTracker::new(Duration::from_secs(1));
        let m = at(0.0);

        tracker.observe(&[obs("a", m)], at(1.0));
        assert_eq!(tracker.observe(&[obs("a", m)], at(2.0)).len(), 1);
        assert!(tracker.unmark(Path::new("a")));
        assert!(!tracker.is_seen(Path::new("a")));
        assert_eq!(tracker.candidate_count(), 1);

        assert_eq!(tracker.observe(&[obs("a", m)], at(3.0)), vec![PathBuf::from("a")]);
        assert!(!tracker.unmark(Path::new("b")));
    }

    #[test]
    fn emits_in_scan_order() {
        let mut tracker = StabilityTracker::new(Duration::from_secs(1));
        let m = at(0.0);
        let scan = [obs("z", m), obs("a", m), obs("m", m)];

        tracker.observe(&scan, at(1.0));
        let stable = tracker.observe(&scan, at(2.0));
        assert_eq!(
            stable,
            vec![PathBuf::from("z"), PathBuf::from("a"), PathBuf::from("m")]
        );
    }
}
