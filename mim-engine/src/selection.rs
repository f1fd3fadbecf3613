//! Pointer-driven spatial selection and the highlight resource it owns.

use crate::surface::{HighlightHandle, MapSurface};
use mim_core::geometry::Geometry;
use mim_core::query::{grouped_count_query, FeatureEffect, QuerySpec, SpatialConstraint, MONTH_FIELD};
use mim_core::region::{RegionHit, RegionId};

/// The currently selected region, as published to the filter state.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialSelection {
    pub region_id: RegionId,
    pub geometry: Geometry,
}

/// Ticket for an in-flight region statistics query.
///
/// `generation` is captured when the query is issued and checked again at
/// completion time; a mismatch means a newer selection (or a reset)
/// superseded this query and its result must be dropped unseen.
#[derive(Debug, Clone)]
pub struct StatsRequest {
    pub generation: u64,
    pub selection: SpatialSelection,
    pub query: QuerySpec,
}

struct ActiveSelection {
    region_id: RegionId,
    geometry: Geometry,
    handle: Box<dyn HighlightHandle>,
}

/// Tracks the most recently selected region under the pointer and owns the
/// single map highlight handle.
///
/// Replacement follows an acquire-then-release protocol: the new highlight
/// handle is acquired before the previous one is removed, so there is never
/// a window with an orphaned handle.
#[derive(Default)]
pub struct SpatialFilterController {
    active: Option<ActiveSelection>,
    generation: u64,
}

impl SpatialFilterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer transition.
    ///
    /// A missed hit (pointer over no region) and a lingering pointer (same
    /// region as the active selection, e.g. during a drag) both change
    /// nothing and return `None`: no re-query, no highlight churn. A new
    /// region swaps the highlight, installs the exclusion effect on the map,
    /// and returns the spatially scoped statistics request to execute.
    pub fn pointer_event(
        &mut self,
        hit: Option<RegionHit>,
        map: &mut dyn MapSurface,
    ) -> Option<StatsRequest> {
        let hit = hit?;
        if self
            .active
            .as_ref()
            .is_some_and(|active| active.region_id == hit.region_id)
        {
            return None;
        }

        self.generation += 1;
        let handle = map.highlight(hit.region_id);
        if let Some(previous) = self.active.replace(ActiveSelection {
            region_id: hit.region_id,
            geometry: hit.geometry.clone(),
            handle,
        }) {
            previous.handle.remove();
        }

        let constraint = SpatialConstraint::intersects(hit.geometry.clone());
        map.set_effect(Some(FeatureEffect::excluding(constraint.clone())));
        log::debug!(
            "selection: region {} selected (generation {})",
            hit.region_id,
            self.generation
        );

        Some(StatsRequest {
            generation: self.generation,
            selection: SpatialSelection {
                region_id: hit.region_id,
                geometry: hit.geometry,
            },
            query: grouped_count_query(MONTH_FIELD, Some(constraint)),
        })
    }

    /// Whether a request issued at `generation` is still the newest selection.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// The active selection, if any.
    pub fn selection(&self) -> Option<SpatialSelection> {
        self.active.as_ref().map(|active| SpatialSelection {
            region_id: active.region_id,
            geometry: active.geometry.clone(),
        })
    }

    /// Release the highlight and invalidate any in-flight request.
    pub fn reset(&mut self) {
        self.generation += 1;
        if let Some(active) = self.active.take() {
            active.handle.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mim_core::geometry::{BoundingBox, Geometry};
    use mim_core::query::{FeatureFilter, SpatialRelationship};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum SurfaceEvent {
        Filter(Option<FeatureFilter>),
        Effect(bool),
        Highlight(RegionId),
        HighlightRemoved(RegionId),
    }

    #[derive(Default)]
    struct RecordingMap {
        events: Rc<RefCell<Vec<SurfaceEvent>>>,
    }

    struct RecordingHandle {
        region: RegionId,
        events: Rc<RefCell<Vec<SurfaceEvent>>>,
    }

    impl HighlightHandle for RecordingHandle {
        fn remove(self: Box<Self>) {
            self.events
                .borrow_mut()
                .push(SurfaceEvent::HighlightRemoved(self.region));
        }
    }

    impl MapSurface for RecordingMap {
        fn set_filter(&mut self, filter: Option<FeatureFilter>) {
            self.events.borrow_mut().push(SurfaceEvent::Filter(filter));
        }

        fn set_effect(&mut self, effect: Option<FeatureEffect>) {
            self.events
                .borrow_mut()
                .push(SurfaceEvent::Effect(effect.is_some()));
        }

        fn highlight(&mut self, region: RegionId) -> Box<dyn HighlightHandle> {
            self.events
                .borrow_mut()
                .push(SurfaceEvent::Highlight(region));
            Box::new(RecordingHandle {
                region,
                events: Rc::clone(&self.events),
            })
        }
    }

    fn hit(region_id: RegionId) -> RegionHit {
        let offset = region_id as f64 * 100.0;
        RegionHit {
            region_id,
            geometry: Geometry::Bbox(BoundingBox::new(offset, 0.0, offset + 10.0, 10.0)),
        }
    }

    #[test]
    fn test_empty_hit_is_noop() {
        let mut controller = SpatialFilterController::new();
        let mut map = RecordingMap::default();
        assert!(controller.pointer_event(None, &mut map).is_none());
        assert!(map.events.borrow().is_empty());
        assert!(controller.selection().is_none());
    }

    #[test]
    fn test_new_region_issues_scoped_request() {
        let mut controller = SpatialFilterController::new();
        let mut map = RecordingMap::default();
        let request = controller.pointer_event(Some(hit(7)), &mut map).unwrap();

        assert_eq!(request.selection.region_id, 7);
        let spatial = request.query.spatial.as_ref().unwrap();
        assert_eq!(
            spatial.spatial_relationship,
            SpatialRelationship::Intersects
        );
        assert_eq!(spatial.geometry, hit(7).geometry);
        assert_eq!(request.query.group_by_fields, vec![MONTH_FIELD.to_string()]);

        let events = map.events.borrow();
        assert_eq!(events[0], SurfaceEvent::Highlight(7));
        assert_eq!(events[1], SurfaceEvent::Effect(true));
    }

    #[test]
    fn test_same_region_is_noop() {
        let mut controller = SpatialFilterController::new();
        let mut map = RecordingMap::default();
        let first = controller.pointer_event(Some(hit(7)), &mut map).unwrap();
        assert!(controller.pointer_event(Some(hit(7)), &mut map).is_none());
        // the original request is still current: no generation bump happened
        assert!(controller.is_current(first.generation));
        let events = map.events.borrow();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, SurfaceEvent::Highlight(_)))
                .count(),
            1
        );
    }

    #[test]
    fn test_replacement_releases_previous_highlight() {
        let mut controller = SpatialFilterController::new();
        let mut map = RecordingMap::default();
        let first = controller.pointer_event(Some(hit(1)), &mut map).unwrap();
        let second = controller.pointer_event(Some(hit(2)), &mut map).unwrap();

        assert!(!controller.is_current(first.generation));
        assert!(controller.is_current(second.generation));
        assert_eq!(controller.selection().unwrap().region_id, 2);

        let events = map.events.borrow();
        // acquire-then-release: highlight(2) comes before remove of handle 1
        let acquire_pos = events
            .iter()
            .position(|e| *e == SurfaceEvent::Highlight(2))
            .unwrap();
        let release_pos = events
            .iter()
            .position(|e| *e == SurfaceEvent::HighlightRemoved(1))
            .unwrap();
        assert!(acquire_pos < release_pos);
    }

    #[test]
    fn test_reset_releases_handle_and_invalidates() {
        let mut controller = SpatialFilterController::new();
        let mut map = RecordingMap::default();
        let request = controller.pointer_event(Some(hit(4)), &mut map).unwrap();
        controller.reset();

        assert!(controller.selection().is_none());
        assert!(!controller.is_current(request.generation));
        assert!(map
            .events
            .borrow()
            .contains(&SurfaceEvent::HighlightRemoved(4)));
    }
}
