//! Static vertex/index data and the attribute layouts that read it.
//!
//! Geometry is uploaded once and never changes. Vertex data is stored as a
//! block of positions followed by a block of colors, so an [`AttributeLayout`]
//! is just a pair of byte offsets into the vertex buffer. Several layouts can
//! point into the same buffer at different offsets, which is how two objects
//! share one upload.

use crate::context::{BufferHandle, BufferKind, GraphicsContext};

/// Floats per position attribute.
pub const POSITION_COMPONENTS: u8 = 3;
/// Floats per color attribute.
pub const COLOR_COMPONENTS: u8 = 4;

const FLOAT_SIZE: u64 = std::mem::size_of::<f32>() as u64;

/// Vertex and index buffers living on the GPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryBuffer {
    vertex_buffer: BufferHandle,
    index_buffer: BufferHandle,
    vertex_count: u32,
    index_count: u32,
}

impl GeometryBuffer {
    /// Upload `vertex_data` (all positions, then all colors) and `indices`.
    ///
    /// Every vertex contributes seven floats, which gives the vertex count.
    pub fn upload<C: GraphicsContext + ?Sized>(
        ctx: &mut C,
        vertex_data: &[f32],
        indices: &[u16],
    ) -> Self {
        let floats_per_vertex = (POSITION_COMPONENTS + COLOR_COMPONENTS) as usize;
        if vertex_data.len() % floats_per_vertex != 0 {
            log::warn!(
                "Vertex data holds {} floats, which is not a multiple of {}; trailing floats are ignored",
                vertex_data.len(),
                floats_per_vertex
            );
        }
        let vertex_count = (vertex_data.len() / floats_per_vertex) as u32;
        let vertex_buffer = ctx.upload_buffer(BufferKind::Vertex, bytemuck::cast_slice(vertex_data));
        let index_buffer = ctx.upload_buffer(BufferKind::Index, bytemuck::cast_slice(indices));
        log::info!(
            "Uploaded {} vertices and {} indices",
            vertex_count,
            indices.len()
        );
        Self {
            vertex_buffer,
            index_buffer,
            vertex_count,
            index_count: indices.len() as u32,
        }
    }

    pub fn vertex_buffer(&self) -> BufferHandle {
        self.vertex_buffer
    }

    pub fn index_buffer(&self) -> BufferHandle {
        self.index_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Byte offset where the color block starts.
    pub fn color_block_offset(&self) -> u64 {
        self.vertex_count as u64 * POSITION_COMPONENTS as u64 * FLOAT_SIZE
    }

    /// Layout reading all vertices from the start of both blocks.
    pub fn full_layout(&self) -> AttributeLayout {
        AttributeLayout::position_color(self, 0, self.color_block_offset())
    }

    /// Layout reading vertices starting at `first_vertex` in both blocks.
    pub fn layout_from_vertex(&self, first_vertex: u32) -> AttributeLayout {
        let first_vertex = first_vertex as u64;
        AttributeLayout::position_color(
            self,
            first_vertex * POSITION_COMPONENTS as u64 * FLOAT_SIZE,
            self.color_block_offset() + first_vertex * COLOR_COMPONENTS as u64 * FLOAT_SIZE,
        )
    }
}

/// One vertex attribute: shader location, float count and base byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: u8,
    pub offset: u64,
}

/// Describes how a draw reads its vertex attributes out of a buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeLayout {
    vertex_buffer: BufferHandle,
    index_buffer: BufferHandle,
    attributes: Vec<VertexAttribute>,
}

impl AttributeLayout {
    pub const POSITION: u32 = 0;
    pub const COLOR: u32 = 1;

    pub fn new(vertex_buffer: BufferHandle, index_buffer: BufferHandle) -> Self {
        Self {
            vertex_buffer,
            index_buffer,
            attributes: Vec::new(),
        }
    }

    /// Position (3 floats) and color (4 floats) at the given byte offsets.
    pub fn position_color(geometry: &GeometryBuffer, position_offset: u64, color_offset: u64) -> Self {
        Self::new(geometry.vertex_buffer(), geometry.index_buffer())
            .with_attribute(Self::POSITION, POSITION_COMPONENTS, position_offset)
            .with_attribute(Self::COLOR, COLOR_COMPONENTS, color_offset)
    }

    /// Add or replace the attribute at `location`.
    pub fn with_attribute(mut self, location: u32, components: u8, offset: u64) -> Self {
        let attribute = VertexAttribute {
            location,
            components,
            offset,
        };
        match self.attributes.iter_mut().find(|a| a.location == location) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
        self
    }

    pub fn vertex_buffer(&self) -> BufferHandle {
        self.vertex_buffer
    }

    pub fn index_buffer(&self) -> BufferHandle {
        self.index_buffer
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, location: u32) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.location == location)
    }

    /// Base byte offset of the attribute at `location`.
    pub fn base_offset(&self, location: u32) -> Option<u64> {
        self.attribute(location).map(|a| a.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(vertex_count: u32) -> GeometryBuffer {
        GeometryBuffer {
            vertex_buffer: BufferHandle(1),
            index_buffer: BufferHandle(2),
            vertex_count,
            index_count: 24,
        }
    }

    #[test]
    fn layouts_over_one_buffer_keep_their_offsets() {
        let geometry = geometry(36);
        let first = geometry.full_layout();
        let second = geometry.layout_from_vertex(18);

        assert_eq!(first.vertex_buffer(), second.vertex_buffer());
        assert_eq!(first.base_offset(AttributeLayout::POSITION), Some(0));
        assert_eq!(first.base_offset(AttributeLayout::COLOR), Some(4 * 3 * 36));
        assert_eq!(second.base_offset(AttributeLayout::POSITION), Some(4 * 3 * 18));
        assert_eq!(
            second.base_offset(AttributeLayout::COLOR),
            Some(4 * 3 * 36 + 4 * 4 * 18)
        );
        assert_ne!(
            first.base_offset(AttributeLayout::POSITION),
            second.base_offset(AttributeLayout::POSITION)
        );
    }

    #[test]
    fn with_attribute_replaces_same_location() {
        let layout = AttributeLayout::new(BufferHandle(1), BufferHandle(2))
            .with_attribute(0, 3, 0)
            .with_attribute(0, 3, 48);
        assert_eq!(layout.attributes().len(), 1);
        assert_eq!(layout.base_offset(0), Some(48));
        assert_eq!(layout.base_offset(1), None);
    }
}
