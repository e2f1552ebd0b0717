//! Registration table behind the scroll observer.
//!
//! The tracker is generic over the element handle so the browser wrapper can
//! store `web_sys::Element`s while tests use plain strings.

/// One observation reported by the platform for a registered element.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry<K> {
    pub target: K,
    /// Visible fraction of the element, 0–1.
    pub ratio: f64,
    pub intersecting: bool,
}

#[derive(Debug, Clone)]
pub struct VisibilityTracker<K> {
    threshold: f64,
    registrations: Vec<(K, usize)>,
}

impl<K: PartialEq> VisibilityTracker<K> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            registrations: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Registers `element` as the section at `index`. Re-registering an
    /// element replaces its index.
    pub fn observe(&mut self, element: K, index: usize) {
        match self
            .registrations
            .iter_mut()
            .find(|(known, _)| *known == element)
        {
            Some(entry) => entry.1 = index,
            None => self.registrations.push((element, index)),
        }
    }

    pub fn unobserve(&mut self, element: &K) -> Option<usize> {
        let position = self
            .registrations
            .iter()
            .position(|(known, _)| known == element)?;
        Some(self.registrations.remove(position).1)
    }

    /// Drops every registration and hands the elements back for platform teardown.
    pub fn unobserve_all(&mut self) -> Vec<K> {
        self.registrations
            .drain(..)
            .map(|(element, _)| element)
            .collect()
    }

    pub fn index_of(&self, element: &K) -> Option<usize> {
        self.registrations
            .iter()
            .find(|(known, _)| known == element)
            .map(|(_, index)| *index)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn qualifies(&self, entry: &VisibilityEntry<K>) -> bool {
        entry.intersecting && entry.ratio >= self.threshold
    }

    /// Section indices to emit for a batch of entries, in report order.
    /// Unknown elements are skipped.
    pub fn visible_indices<'a, I>(&self, entries: I) -> Vec<usize>
    where
        I: IntoIterator<Item = &'a VisibilityEntry<K>>,
        K: 'a,
    {
        entries
            .into_iter()
            .filter(|entry| self.qualifies(entry))
            .filter_map(|entry| self.index_of(&entry.target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(target: &'static str, ratio: f64, intersecting: bool) -> VisibilityEntry<&'static str> {
        VisibilityEntry {
            target,
            ratio,
            intersecting,
        }
    }

    fn tracker() -> VisibilityTracker<&'static str> {
        let mut tracker = VisibilityTracker::new(0.5);
        tracker.observe("dawn", 0);
        tracker.observe("winter", 1);
        tracker.observe("experts", 2);
        tracker
    }

    #[test]
    fn emits_only_elements_over_threshold() {
        let tracker = tracker();
        let entries = [
            entry("dawn", 0.2, true),
            entry("winter", 0.5, true),
            entry("experts", 0.9, false),
        ];
        assert_eq!(tracker.visible_indices(&entries), vec![1]);
    }

    #[test]
    fn keeps_report_order_for_multiple_hits() {
        let tracker = tracker();
        let entries = [entry("experts", 0.7, true), entry("winter", 0.6, true)];
        assert_eq!(tracker.visible_indices(&entries), vec![2, 1]);
    }

    #[test]
    fn unknown_elements_are_ignored() {
        let tracker = tracker();
        assert!(tracker.visible_indices(&[entry("spacer", 1.0, true)]).is_empty());
    }

    #[test]
    fn reregistering_replaces_index() {
        let mut tracker = tracker();
        tracker.observe("dawn", 4);
        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.index_of(&"dawn"), Some(4));
    }

    #[test]
    fn teardown_releases_every_element() {
        let mut tracker = tracker();
        assert_eq!(tracker.unobserve(&"winter"), Some(1));
        let released = tracker.unobserve_all();
        assert_eq!(released, vec!["dawn", "experts"]);
        assert!(tracker.is_empty());
    }
}
