//! CPU-side vertex assembly shared by the sprite pipeline.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::canvas::{DrawQueue, DrawSource};

// ── vertex ────────────────────────────────────────────────────────────────

/// Vertex layout (32 bytes):
///
///  offset  0  pos    [f32; 2]   loc 0  (clip space)
///  offset  8  uv     [f32; 2]   loc 1
///  offset 16  color  [f32; 4]   loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl GpuVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Float32x4  // color
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── segments ──────────────────────────────────────────────────────────────

/// One draw call's slice of the shared vertex and index buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub source: DrawSource,
    pub indices: Range<u32>,
    pub base_vertex: i32,
}

/// Flattens a queue into clip-space vertices, indices and per-call segments.
///
/// Indices stay local to each call; `base_vertex` rebases them at draw time.
/// The index list is padded to an even length so its byte size satisfies
/// wgpu's 4-byte copy alignment.
pub fn assemble(queue: &DrawQueue) -> (Vec<GpuVertex>, Vec<u16>, Vec<Segment>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut segments = Vec::with_capacity(queue.len());

    for call in queue.calls() {
        let m = call.transform.matrix();
        let base_vertex = vertices.len() as i32;
        let first = indices.len() as u32;

        vertices.extend(call.vertices.iter().map(|v| {
            let p = m.project_point3(v.position.extend(0.0));
            GpuVertex { pos: [p.x, p.y], uv: v.uv.to_array(), color: v.color.to_f32() }
        }));
        indices.extend_from_slice(&call.indices);

        segments.push(Segment {
            source: call.source,
            indices: first..indices.len() as u32,
            base_vertex,
        });
    }

    if indices.len() % 2 == 1 {
        indices.push(0);
    }

    (vertices, indices, segments)
}

// ── blend ─────────────────────────────────────────────────────────────────

/// `src_alpha, one_minus_src_alpha` on straight-alpha colors.
pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState::ALPHA_BLENDING
}
