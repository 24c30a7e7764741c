// extensions/mod.rs
//
// Math extensions shared by games: easing curves and explicit transforms.
// Pure values in, values out.

pub mod easing;
pub mod transform;

pub use easing::{Easing, lerp, lerp_vec3, smoothstep};
pub use transform::Transform;
