//! Nimbus Render - wgpu back-end for the sky
//!
//! Turns the simulation's draw list into one batched, alpha-blended
//! triangle list per frame. Soft blobs are layered translucent fans, so
//! there are no textures and only a pass-through shader.

mod batch;
pub mod blob;
mod context;
mod headless;
mod pipeline;
mod vertex;

pub use batch::DrawBatch;
pub use blob::{Ring, BLOB_SLICES};
pub use context::{RenderContext, RenderError};
pub use headless::HeadlessContext;
pub use pipeline::{FlatPipeline, ViewportUniforms};
pub use vertex::Vertex2D;

#[cfg(test)]
mod tests {
    #[test]
    fn flat_shader_wgsl_parses() {
        let source = include_str!("flat_shader.wgsl");
        naga::front::wgsl::parse_str(source).expect("flat_shader.wgsl failed to parse");
    }
}
