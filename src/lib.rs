//! box-ngin
//!
//! Small shader-based rendering demos on top of wgpu and winit. The crate
//! exposes the pieces the demos are built from: a GL-flavoured graphics
//! context, shader loading with typed errors, static geometry with attribute
//! layouts, a matrix stack, a perspective projection and a frame loop.
//!
//! High-level modules
//! - `camera`: perspective projection and the GL-to-wgpu depth conversion
//! - `config`: window, projection and pipeline settings
//! - `context`: the graphics context trait and its wgpu implementation
//! - `data_structures`: geometry, shapes, transform stack, scene nodes, animation
//! - `demos`: the tutorial programs
//! - `flow`: frame loop and winit application handler
//! - `input`: keyboard mapping
//! - `pipelines`: the render pipeline behind every linked program
//! - `resources`: asset and shader loading
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod demos;
pub mod flow;
pub mod input;
pub mod pipelines;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use wgpu;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::WindowEvent;
