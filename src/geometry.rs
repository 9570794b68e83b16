//! Element geometry as consumed by the stabilization and tensor kernels.
use crate::Real;
use itertools::Itertools;
use log::warn;
use nalgebra::{Matrix3, Point3, Vector3};
use numeric_literals::replace_float_literals;

/// The slice of element geometry exposed by the host mesh layer.
///
/// The kernels in this crate only ever ask an element for its topological
/// dimension, its characteristic lengths, its vertices and (for 1D
/// elements) its volume; mesh topology stays with the host.
pub trait ElementGeometry<T: Real> {
    /// Topological dimension of the element (1, 2 or 3), which may be lower
    /// than the dimension of the surrounding mesh.
    fn dim(&self) -> usize;

    /// Smallest distance between any two vertices.
    fn hmin(&self) -> T;

    /// Largest distance between any two vertices.
    fn hmax(&self) -> T;

    /// Element volume. Only consulted for one-dimensional elements, where
    /// it equals the element length.
    fn volume(&self) -> T;

    /// Vertex coordinates, embedded in 3D.
    fn vertices(&self) -> &[Point3<T>];
}

/// A minimal [`ElementGeometry`] backed by an explicit vertex list.
///
/// Characteristic lengths are precomputed at construction as the extrema of
/// the pairwise vertex distances. For one-dimensional elements the volume
/// is the distance between the two endpoints; for higher dimensions it is
/// not needed by any kernel in this crate and defaults to zero (use
/// [`with_volume`](VertexElement::with_volume) if a caller requires it).
#[derive(Clone, Debug, PartialEq)]
pub struct VertexElement<T: Real> {
    dim: usize,
    vertices: Vec<Point3<T>>,
    hmin: T,
    hmax: T,
    volume: T,
}

impl<T: Real> VertexElement<T> {
    /// # Panics
    ///
    /// Panics if `dim` is not 1, 2 or 3, or if fewer than two vertices are
    /// supplied.
    pub fn new(dim: usize, vertices: Vec<Point3<T>>) -> Self {
        assert!((1..=3).contains(&dim), "element dimension must be 1, 2 or 3");
        assert!(vertices.len() >= 2, "an element needs at least two vertices");

        let mut hmin = (vertices[1] - vertices[0]).norm();
        let mut hmax = hmin;
        for (p, q) in vertices.iter().tuple_combinations() {
            let d = (*q - *p).norm();
            hmin = hmin.min(d);
            hmax = hmax.max(d);
        }

        let volume = if dim == 1 { hmax } else { T::zero() };
        Self {
            dim,
            vertices,
            hmin,
            hmax,
            volume,
        }
    }

    pub fn with_volume(mut self, volume: T) -> Self {
        self.volume = volume;
        self
    }
}

impl<T: Real> ElementGeometry<T> for VertexElement<T> {
    fn dim(&self) -> usize {
        self.dim
    }

    fn hmin(&self) -> T {
        self.hmin
    }

    fn hmax(&self) -> T {
        self.hmax
    }

    fn volume(&self) -> T {
        self.volume
    }

    fn vertices(&self) -> &[Point3<T>] {
        &self.vertices
    }
}

/// Builds the rotation matrix mapping the local frame of a lower-dimensional
/// element (fracture or well) into the global frame.
///
/// Column 0 is the tangential axis along the element, column 2 the normal;
/// for 2D elements whose plane is not horizontal the tangential axis is
/// chosen horizontal, so the second column carries the dip direction.
///
/// # Panics
///
/// Panics unless `dim` is 1 or 2 and at least `dim + 1` vertices are given.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn lower_dim_rotation_matrix<T: Real>(dim: usize, vertices: &[Point3<T>]) -> Matrix3<T> {
    assert!(
        dim == 1 || dim == 2,
        "only lower-dimensional elements carry a local frame"
    );
    assert!(vertices.len() > dim, "not enough vertices for a {dim}D element");

    let eps = T::default_epsilon();
    let mut xp: Vector3<T> = vertices[1] - vertices[0];
    if xp.norm() == 0.0 {
        warn!("coincident vertices while building a local element frame");
    }

    let yp;
    let zp;
    if dim == 1 {
        let mut y = Vector3::zeros();
        if xp.x.abs() > 0.0 && xp.y.abs() + xp.z.abs() < eps {
            y.z = 1.0;
        } else if xp.y.abs() > 0.0 && xp.x.abs() + xp.z.abs() < eps {
            y.x = 1.0;
        } else if xp.z.abs() > 0.0 && xp.x.abs() + xp.y.abs() < eps {
            y.y = 1.0;
        } else {
            for i in 0..3 {
                if xp[i].abs() > 0.0 {
                    y[i] = -xp[i];
                    break;
                }
            }
        }
        zp = xp.cross(&y);
        yp = zp.cross(&xp);
    } else {
        let y: Vector3<T> = vertices[2] - vertices[1];
        zp = xp.cross(&y);
        if (zp.x.abs() + zp.y.abs()) / zp.norm() >= eps {
            xp = Vector3::z().cross(&zp);
        } else {
            // horizontal fracture
            xp = Vector3::x();
        }
        yp = zp.cross(&xp);
    }

    Matrix3::from_columns(&[xp / xp.norm(), yp / yp.norm(), zp / zp.norm()])
}

/// Geometric scaling applied to the raw scale factor of an element.
///
/// In a 3D mesh the raw value of a 2D element is a fracture aperture and is
/// used directly, while the raw value of a 1D element is a well diameter
/// and is converted into the circular cross-section area; 3D elements in a
/// 3D mesh are unscaled. In 1D and 2D meshes the raw value passes through.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn scale_factor<T: Real>(mesh_dim: usize, elem_dim: usize, raw: T) -> T {
    match (mesh_dim, elem_dim) {
        (3, 2) => raw,
        (3, 1) => T::pi() * raw * raw / 4.0,
        (3, _) => 1.0,
        _ => raw,
    }
}
