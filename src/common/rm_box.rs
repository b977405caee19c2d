use serde::{Deserialize, Serialize};

/// Axis-aligned box stored as top-left corner plus size, in pixels of the
/// padded network input.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RmBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RmBox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the maximum x-coordinate of the bounding box.
    pub fn x_max(&self) -> f32 {
        self.x + self.w
    }

    /// Returns the maximum y-coordinate of the bounding box.
    pub fn y_max(&self) -> f32 {
        self.y + self.h
    }

    /// Returns the center x-coordinate of the bounding box.
    pub fn cx(&self) -> f32 {
        self.x + self.w / 2.
    }

    /// Returns the bounding box coordinates as `(x1, y1, x2, y2)`.
    pub fn xy1_xy2(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.x_max(), self.y_max())
    }

    /// Computes the area of the bounding box.
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Computes the intersection area between this bounding box and another.
    /// Disjoint boxes give `0`.
    pub fn intersect(&self, other: &RmBox) -> f32 {
        let left = self.x.max(other.x);
        let right = self.x_max().min(other.x_max());
        let top = self.y.max(other.y);
        let bottom = self.y_max().min(other.y_max());
        (right - left).max(0.) * (bottom - top).max(0.)
    }

    /// Computes the union area between this bounding box and another.
    pub fn union(&self, other: &RmBox) -> f32 {
        self.area() + other.area() - self.intersect(other)
    }

    /// Sets the box from its top-left corner and size.
    pub fn with_x1y1_wh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.x = x;
        self.y = y;
        self.w = w;
        self.h = h;
        self
    }

    /// Sets the box from two corners. The size is `x2 - x1` by `y2 - y1`.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x = x1;
        self.y = y1;
        self.w = x2 - x1;
        self.h = y2 - y1;
        self
    }

    /// Clips both corners independently to `[0, max_x] x [0, max_y]` and
    /// recomputes the size from the clipped corners.
    pub fn clipped(&self, max_x: f32, max_y: f32) -> Self {
        let clip = |v: f32, hi: f32| v.min(hi).max(0.);
        let (x1, y1, x2, y2) = self.xy1_xy2();
        RmBox::default().with_x1y1_x2y2(
            clip(x1, max_x),
            clip(y1, max_y),
            clip(x2, max_x),
            clip(y2, max_y),
        )
    }

    pub fn as_xy_wh_i32(&self) -> (i32, i32, i32, i32) {
        (self.x.round() as i32,
         self.y.round() as i32,
         self.w.round() as i32,
         self.h.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::RmBox;

    #[test]
    fn intersect_of_disjoint_boxes_is_zero() {
        let a = RmBox::new(0., 0., 10., 10.);
        let b = RmBox::new(20., 20., 5., 5.);
        assert_eq!(a.intersect(&b), 0.);
        assert_eq!(a.union(&b), 125.);
    }

    #[test]
    fn intersect_of_overlapping_boxes() {
        let a = RmBox::new(0., 0., 10., 10.);
        let b = RmBox::new(5., 5., 10., 10.);
        assert_eq!(a.intersect(&b), 25.);
        assert_eq!(a.union(&b), 175.);
    }

    #[test]
    fn clip_keeps_size_non_negative() {
        let b = RmBox::new(500., -40., 30., 20.).clipped(415., 331.);
        assert_eq!(b.x, 415.);
        assert_eq!(b.w, 0.);
        assert_eq!(b.y, 0.);
        assert_eq!(b.h, 0.);
    }
}
