//! Engine data structures: geometry, transforms, scene nodes and textures.
//!
//! - `animation` holds elapsed-time driven motion
//! - `geometry` uploads static vertex/index data and describes attribute layouts
//! - `scene_graph` stores named nodes and their children in an arena
//! - `shapes` contains the compiled-in demo geometry
//! - `texture` wraps the depth buffer
//! - `transform` is the push/pop matrix stack

pub mod animation;
pub mod geometry;
pub mod scene_graph;
pub mod shapes;
pub mod texture;
pub mod transform;
