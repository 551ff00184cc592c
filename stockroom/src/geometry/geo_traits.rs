/// Trait for shared properties of three-dimensional storable objects.
///
/// All quantities are expressed in whole centimeters (cm, cm² and cm³).
pub trait Solid {
    /// Largest cross-sectional area of the object
    fn area(&self) -> u64;

    /// Volume occupied by the object
    fn volume(&self) -> u64;

    /// The largest extent of the object along any axis.
    fn max_dimension(&self) -> u64;
}
