// Active contact points, in the order they touched down.

pub type PointerId = i32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: Point) -> f64 {
        crate::util::distance((self.x, self.y), (other.x, other.y))
    }
}

/// Insertion-ordered map from pointer id to last known screen position.
/// Contacts are few (a hand has five fingers), so a vec beats a hash map here.
#[derive(Clone, Debug, Default)]
pub struct PointerSet {
    entries: Vec<(PointerId, Point)>,
}

impl PointerSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracks a new contact, or refreshes the position of a known one without
    /// changing its place in the order.
    pub fn insert(&mut self, id: PointerId, at: Point) {
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = at,
            None => self.entries.push((id, at)),
        }
    }

    /// Returns false for unknown ids.
    pub fn update(&mut self, id: PointerId, at: Point) -> bool {
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => {
                entry.1 = at;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: PointerId) -> Option<Point> {
        let idx = self.entries.iter().position(|(k, _)| *k == id)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn first(&self) -> Option<Point> {
        self.entries.first().map(|(_, p)| *p)
    }

    /// The two earliest contacts; only these drive pinch geometry.
    pub fn pair(&self) -> Option<(Point, Point)> {
        match self.entries.as_slice() {
            [(_, a), (_, b), ..] => Some((*a, *b)),
            _ => None,
        }
    }
}
