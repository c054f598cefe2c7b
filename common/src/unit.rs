//! Marker types.

/// Marker type describing an entity delivery.
#[derive(Clone, Copy, Debug)]
pub struct Delivery;
