//! Affine local-to-world transformation.

use mesh_types::TriangleMesh;
use nalgebra::{Matrix4, Point3, Unit, UnitQuaternion, Vector3};

/// An affine transformation stored as a 4x4 matrix.
///
/// This is the object-to-world transform of a scene node: it maps mesh-local
/// points into world space. Compose parent and child transforms with
/// [`then`](Self::then).
///
/// # Example
///
/// ```
/// use mesh_transform::Transform3D;
/// use nalgebra::Point3;
///
/// let local_to_world = Transform3D::uniform_scale(2.0).then(&Transform3D::translation(1.0, 0.0, 0.0));
/// let p = local_to_world.transform_point(&Point3::new(1.0, 1.0, 1.0));
/// assert!((p.x - 3.0).abs() < 1e-12);
/// assert!((p.y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    matrix: Matrix4<f64>,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create a transformation from a 4x4 matrix.
    #[must_use]
    pub const fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    /// The identity transformation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vector3::new(tx, ty, tz)),
        }
    }

    /// A uniform scale about the origin.
    #[must_use]
    pub fn uniform_scale(factor: f64) -> Self {
        Self::scale(factor, factor, factor)
    }

    /// A non-uniform scale about the origin.
    #[must_use]
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)),
        }
    }

    /// A rotation of `angle` radians about `axis`.
    ///
    /// Returns the identity if the axis is zero.
    #[must_use]
    pub fn rotation_axis(axis: Vector3<f64>, angle: f64) -> Self {
        Unit::try_new(axis, f64::EPSILON).map_or_else(Self::identity, |axis| Self {
            matrix: UnitQuaternion::from_axis_angle(&axis, angle).to_homogeneous(),
        })
    }

    /// Build a node transform from translation, rotation and per-axis scale.
    ///
    /// Scale is applied first, then rotation, then translation.
    #[must_use]
    pub fn from_trs(
        translation: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
        scale: Vector3<f64>,
    ) -> Self {
        let matrix = Matrix4::new_translation(&translation)
            * rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&scale);
        Self { matrix }
    }

    /// The underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Compose with another transformation: `self` first, then `other`.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// The inverse transformation, or `None` if the matrix is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// Map a point (translation applies).
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }

    /// Map a direction (translation ignored).
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.transform_vector(vector)
    }

    /// Map a surface normal with the inverse transpose of the linear part.
    ///
    /// Returns the normal unchanged if the linear part is singular.
    #[must_use]
    pub fn transform_normal(&self, normal: &Vector3<f64>) -> Vector3<f64> {
        let linear = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        linear
            .try_inverse()
            .map_or(*normal, |inv| inv.transpose() * normal)
    }

    /// Bake this transformation into a copy of a mesh snapshot.
    #[must_use]
    pub fn apply_to_mesh(&self, mesh: &TriangleMesh) -> TriangleMesh {
        TriangleMesh::from_parts(
            mesh.positions
                .iter()
                .map(|p| self.transform_point(p))
                .collect(),
            mesh.indices.clone(),
        )
    }
}
