use crate::common::Point2;
use crate::error::DetectError;

const UNDISTORT_ITERATIONS: usize = 5;

/// Pinhole intrinsics plus `(k1, k2, p1, p2, k3)` distortion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraModel {
    pub matrix: [[f32; 3]; 3],
    pub dist_coeffs: [f32; 5],
}

impl CameraModel {
    /// Builds the model from a row-major 3x3 matrix and a 5-element
    /// distortion vector.
    pub fn new(camera_matrix: &[f32], dist_coeffs: &[f32]) -> Result<Self, DetectError> {
        if camera_matrix.len() != 9 {
            return Err(DetectError::Config(format!(
                "camera_matrix needs 9 values, got {}",
                camera_matrix.len()
            )));
        }
        let dist_coeffs: [f32; 5] = dist_coeffs.try_into().map_err(|_| {
            DetectError::Config(format!(
                "distortion_coefficients needs 5 values, got {}",
                dist_coeffs.len()
            ))
        })?;
        let mut matrix = [[0f32; 3]; 3];
        for (i, row) in matrix.iter_mut().enumerate() {
            row.copy_from_slice(&camera_matrix[i * 3..i * 3 + 3]);
        }
        if matrix[0][0] == 0. || matrix[1][1] == 0. {
            return Err(DetectError::Config("camera_matrix has a zero focal length".to_string()));
        }
        Ok(Self { matrix, dist_coeffs })
    }

    pub fn fx(&self) -> f32 { self.matrix[0][0] }
    pub fn fy(&self) -> f32 { self.matrix[1][1] }
    pub fn cx(&self) -> f32 { self.matrix[0][2] }
    pub fn cy(&self) -> f32 { self.matrix[1][2] }

    /// Maps raw pixel points to undistorted normalized image coordinates.
    pub fn undistort_points(&self, points: [Point2; 2]) -> [Point2; 2] {
        points.map(|p| self.undistort_point(p))
    }

    /// Fixed-point inversion of the radial-tangential model.
    pub fn undistort_point(&self, p: Point2) -> Point2 {
        let x0 = (p.x - self.cx()) / self.fx();
        let y0 = (p.y - self.cy()) / self.fy();
        let [k1, k2, p1, p2, k3] = self.dist_coeffs;

        if k1 == 0.0 && k2 == 0.0 && p1 == 0.0 && p2 == 0.0 && k3 == 0.0 {
            return Point2::new(x0, y0);
        }

        let (mut x, mut y) = (x0, y0);
        for _ in 0..UNDISTORT_ITERATIONS {
            let r2 = x * x + y * y;
            let icdist = 1.0 / (1.0 + ((k3 * r2 + k2) * r2 + k1) * r2);
            let delta_x = 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x);
            let delta_y = p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * x * y;
            x = (x0 - delta_x) * icdist;
            y = (y0 - delta_y) * icdist;
        }
        Point2::new(x, y)
    }
}
