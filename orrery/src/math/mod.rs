//! Vector and quaternion helpers on top of nalgebra.
//!
//! nalgebra already provides the arithmetic (`+`, `-`, scaling, `dot`, `cross`,
//! `norm`). What lives here are the guarded variants the geometry relies on:
//! normalization that yields zero for degenerate input instead of NaN, and a
//! rotation quaternion built and applied with an explicit Hamilton product.

pub mod quaternion;
pub mod vector;

pub type Vector3 = na::Vector3<f64>;
pub type Quaternion = na::Quaternion<f64>;

pub use quaternion::AxisRotation;
