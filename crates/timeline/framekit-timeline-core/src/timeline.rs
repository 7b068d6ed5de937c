//! Timeline: records sorted by fire time with a moving head.
//!
//! Layout invariant: `records[..head]` have fired during the current pass and
//! `records[head..]` are pending, both in ascending fire time. On a one-shot
//! timeline new records always go at or after `head`, so a fired record is
//! never fired twice. A looped timeline keeps the whole list sorted: a record
//! that sorts among the fired ones waits for the next pass.

use log::{debug, trace};

use crate::config::TimelineConfig;
use crate::ids::{RecordId, RecordIdAllocator};

struct Record<A> {
    id: RecordId,
    time: f32,
    action: A,
    comment: Option<String>,
}

pub struct Timeline<A> {
    records: Vec<Record<A>>,
    head: usize,
    current_time: f32,
    paused: bool,
    looped: bool,
    ids: RecordIdAllocator,
    cfg: TimelineConfig,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::with_config(TimelineConfig::default())
    }
}

impl<A> core::fmt::Debug for Timeline<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeline")
            .field("records", &self.records.len())
            .field("head", &self.head)
            .field("current_time", &self.current_time)
            .field("paused", &self.paused)
            .field("looped", &self.looped)
            .finish()
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: TimelineConfig) -> Self {
        Self {
            records: Vec::new(),
            head: 0,
            current_time: 0.0,
            paused: false,
            looped: false,
            ids: RecordIdAllocator::default(),
            cfg,
        }
    }

    /// Schedule `action` to fire `delay` seconds after the current time.
    pub fn add(&mut self, delay: f32, action: A, comment: Option<&str>) -> RecordId {
        self.add_absolute(self.current_time + delay, action, comment)
    }

    /// Schedule `action` at an absolute timeline time.
    ///
    /// The record goes right before the first record with a strictly greater
    /// time, so ties fire in insertion order. Only pending records are
    /// searched unless the timeline loops.
    pub fn add_absolute(&mut self, time: f32, action: A, comment: Option<&str>) -> RecordId {
        let id = self.ids.alloc();
        let from = if self.looped { 0 } else { self.head };
        let idx = from
            + self.records[from..]
                .iter()
                .position(|r| r.time > time)
                .unwrap_or(self.records.len() - from);
        if idx < self.head {
            self.head += 1;
        }
        self.records.insert(
            idx,
            Record {
                id,
                time,
                action,
                comment: comment.map(str::to_owned),
            },
        );
        trace!("timeline: scheduled {:?} at {}", id, time);
        id
    }

    /// Cancel a record. Returns its action if it was still present.
    pub fn remove(&mut self, id: RecordId) -> Option<A> {
        let idx = self.records.iter().position(|r| r.id == id)?;
        let record = self.records.remove(idx);
        if idx < self.head {
            self.head -= 1;
        } else if idx == self.head {
            // The next record slid into the head slot; wrap if none is left.
            self.wrap_if_exhausted();
        }
        trace!("timeline: removed {:?}", id);
        Some(record.action)
    }

    /// Advance time by `delta` and fire the head record if it is due.
    ///
    /// At most one record fires per call. Returns the id of the fired record.
    pub fn update<F>(&mut self, delta: f32, mut fire: F) -> Option<RecordId>
    where
        F: FnMut(RecordId, &mut A),
    {
        if self.paused || self.is_finished() {
            return None;
        }
        self.current_time += delta;
        let record = self.records.get_mut(self.head)?;
        if self.current_time <= record.time {
            return None;
        }
        let id = record.id;
        fire(id, &mut record.action);
        match record.comment.as_deref() {
            Some(comment) => debug!("timeline: fired {:?} ({})", id, comment),
            None => trace!("timeline: fired {:?}", id),
        }
        self.shift();
        Some(id)
    }

    fn shift(&mut self) {
        self.head += 1;
        if self.head < self.records.len() {
            if self.head > self.cfg.skipped_record_threshold && !self.looped {
                self.clear_fired();
            }
        } else {
            self.wrap_if_exhausted();
        }
    }

    fn wrap_if_exhausted(&mut self) {
        if self.head >= self.records.len() && self.looped && !self.records.is_empty() {
            self.current_time = 0.0;
            self.head = 0;
        }
    }

    /// Drop fired records behind the head. Pending records are never purged,
    /// even when their fire time is already behind the current time.
    fn clear_fired(&mut self) {
        let fired = self.head;
        self.records.drain(..fired);
        self.head = 0;
        trace!("timeline: compacted {} fired records", fired);
    }

    /// Finished when nothing is pending and the timeline does not loop.
    pub fn is_finished(&self) -> bool {
        self.head >= self.records.len() && !(self.looped && !self.records.is_empty())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    pub fn set_looped(&mut self, looped: bool) {
        self.looped = looped;
        self.wrap_if_exhausted();
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Fire time of the next due record.
    pub fn head_time(&self) -> Option<f32> {
        self.records.get(self.head).map(|r| r.time)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Records still waiting to fire in this pass.
    pub fn pending(&self) -> usize {
        self.records.len() - self.head
    }

    /// Records held, fired ones awaiting compaction included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.head = 0;
        self.current_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tl: &mut Timeline<&'static str>, delta: f32, ticks: usize) -> Vec<&'static str> {
        let mut fired = Vec::new();
        for _ in 0..ticks {
            tl.update(delta, |_, a| fired.push(*a));
        }
        fired
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut tl = Timeline::new();
        tl.add(1.0, "a", None);
        tl.add(1.0, "b", None);
        tl.add(0.5, "c", None);
        assert_eq!(run(&mut tl, 0.6, 5), vec!["c", "a", "b"]);
        assert!(tl.is_finished());
    }

    #[test]
    fn fires_only_after_time_passes() {
        let mut tl = Timeline::new();
        tl.add(0.5, "x", None);
        assert!(run(&mut tl, 0.25, 2).is_empty());
        assert_eq!(run(&mut tl, 0.25, 1), vec!["x"]);
    }

    #[test]
    fn removing_head_promotes_next() {
        let mut tl = Timeline::new();
        let a = tl.add(0.1, "a", None);
        tl.add(0.2, "b", None);
        assert_eq!(tl.remove(a), Some("a"));
        assert_eq!(tl.head_time(), Some(0.2));
        assert_eq!(run(&mut tl, 0.3, 3), vec!["b"]);
        assert!(tl.remove(a).is_none());
    }

    #[test]
    fn looping_restarts_from_zero() {
        let mut tl = Timeline::new();
        tl.set_looped(true);
        tl.add(0.1, "a", None);
        tl.add(0.2, "b", None);
        let fired = run(&mut tl, 0.15, 4);
        assert_eq!(fired, vec!["a", "b", "a", "b"]);
        assert!(!tl.is_finished());
    }

    #[test]
    fn compaction_keeps_pending_records() {
        let mut tl = Timeline::new();
        for name in ["a", "b", "c", "d", "e", "f"] {
            tl.add(0.0, name, None);
        }
        let fired = run(&mut tl, 1.0, 6);
        assert_eq!(fired, vec!["a", "b", "c", "d", "e", "f"]);
        assert!(tl.len() < 6);
    }

    #[test]
    fn add_after_finish_becomes_head() {
        let mut tl = Timeline::new();
        tl.add(0.1, "a", None);
        run(&mut tl, 0.2, 1);
        assert!(tl.is_finished());
        tl.add(0.1, "late", None);
        assert!(!tl.is_finished());
        assert_eq!(run(&mut tl, 0.2, 1), vec!["late"]);
    }

    #[test]
    fn paused_does_not_advance() {
        let mut tl = Timeline::new();
        tl.add(0.1, "a", None);
        tl.set_paused(true);
        assert!(run(&mut tl, 1.0, 3).is_empty());
        assert_eq!(tl.current_time(), 0.0);
    }
}
