//! Append-only collection of survey stations with its extent.

use crate::core::{Bounds, Point};

use super::{SurveyNode, SurveyPoint};

/// Survey map: stations in the order they were surveyed.
///
/// The bounding box covers every station position and every point inserted
/// through the map. It is empty until the first node is added.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurveyMap {
    nodes: Vec<SurveyNode>,
    bounds: Bounds,
}

impl SurveyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a station and grow the extent to cover it.
    ///
    /// Returns the index of the new station.
    pub fn add_node(&mut self, node: SurveyNode) -> usize {
        self.bounds.expand_to_include(node.position());
        for point in node.points() {
            self.bounds.expand_to_include(point.position);
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Append a map-frame point to a station already in the map.
    ///
    /// Returns `None` if there is no station at `node`.
    pub fn append_point(
        &mut self,
        node: usize,
        position: Point,
        raw_angle: f32,
        raw_distance: f32,
    ) -> Option<SurveyPoint> {
        let station = self.nodes.get_mut(node)?;
        let point = *station.add_point(position, raw_angle, raw_distance);
        self.bounds.expand_to_include(point.position);
        Some(point)
    }

    /// Append a polar reading to a station already in the map.
    pub fn append_polar_point(
        &mut self,
        node: usize,
        angle: f32,
        distance: f32,
    ) -> Option<SurveyPoint> {
        let station = self.nodes.get_mut(node)?;
        let point = *station.add_polar_point(angle, distance);
        self.bounds.expand_to_include(point.position);
        Some(point)
    }

    /// Recompute the walls of a station already in the map.
    pub fn compute_wall_data(&mut self, node: usize) -> bool {
        match self.nodes.get_mut(node) {
            Some(station) => {
                station.compute_wall_data();
                true
            }
            None => false,
        }
    }

    pub fn node(&self, index: usize) -> Option<&SurveyNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[SurveyNode] {
        &self.nodes
    }

    pub fn last_node(&self) -> Option<&SurveyNode> {
        self.nodes.last()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Map extent, `None` until something has been inserted.
    pub fn bounds(&self) -> Option<Bounds> {
        if self.bounds.is_empty() {
            None
        } else {
            Some(self.bounds)
        }
    }

    pub fn min_x(&self) -> Option<f32> {
        self.bounds().map(|b| b.min_x)
    }

    pub fn max_x(&self) -> Option<f32> {
        self.bounds().map(|b| b.max_x)
    }

    pub fn min_y(&self) -> Option<f32> {
        self.bounds().map(|b| b.min_y)
    }

    pub fn max_y(&self) -> Option<f32> {
        self.bounds().map(|b| b.max_y)
    }

    /// Total number of points over all stations.
    pub fn point_count(&self) -> usize {
        self.nodes.iter().map(SurveyNode::len).sum()
    }

    /// Total number of walls over all stations.
    pub fn wall_count(&self) -> usize {
        self.nodes.iter().map(|n| n.walls().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Angle;

    #[test]
    fn test_empty_map_has_no_bounds() {
        let map = SurveyMap::new();
        assert!(map.is_empty());
        assert!(map.bounds().is_none());
        assert!(map.min_x().is_none());
        assert!(map.max_y().is_none());
    }

    #[test]
    fn test_add_node_covers_position_and_points() {
        let mut map = SurveyMap::new();
        let mut node = SurveyNode::new(Point::new(10.0, 10.0), Angle::default(), Point::default());
        node.add_point(Point::new(-5.0, 40.0), 0.0, 30.0);
        node.add_point(Point::new(25.0, 2.0), 90.0, 15.0);

        assert_eq!(map.add_node(node), 0);
        let b = map.bounds().unwrap();
        assert_eq!(b.min_x, -5.0);
        assert_eq!(b.max_x, 25.0);
        assert_eq!(b.min_y, 2.0);
        assert_eq!(b.max_y, 40.0);
        assert_eq!(map.point_count(), 2);
    }

    #[test]
    fn test_append_point_updates_bounds() {
        let mut map = SurveyMap::new();
        map.add_node(SurveyNode::new(Point::new(0.0, 0.0), Angle::default(), Point::default()));
        assert_eq!(map.bounds().unwrap().width(), 0.0);

        let p = map.append_point(0, Point::new(-12.0, 7.0), -45.0, 14.0).unwrap();
        assert!(!p.is_valid);
        assert_eq!(map.min_x(), Some(-12.0));
        assert_eq!(map.max_y(), Some(7.0));

        let p = map.append_polar_point(0, 0.0, 100.0).unwrap();
        assert!((p.y() - 100.0).abs() < 1e-3);
        assert!(map.max_y().unwrap() >= 99.99);

        assert!(map.append_point(3, Point::new(0.0, 0.0), 0.0, 0.0).is_none());
        assert!(!map.compute_wall_data(3));
    }

    #[test]
    fn test_bounds_contains_every_station() {
        let mut map = SurveyMap::new();
        let stations = [(0.0, 0.0), (50.0, -20.0), (-30.0, 80.0)];
        for (x, y) in stations {
            map.add_node(SurveyNode::new(Point::new(x, y), Angle::default(), Point::default()));
        }
        let b = map.bounds().unwrap();
        for node in map.nodes() {
            assert!(b.contains(node.position()));
        }
        assert_eq!(map.len(), 3);
        assert_eq!(map.last_node().unwrap().position(), Point::new(-30.0, 80.0));
    }
}
