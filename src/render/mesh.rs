use super::helpers;
use super::instances::MeshInstanceRaw;
use folio_core::geometry::{Shape, Vertex};
use wgpu;
use wgpu::util::DeviceExt;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4,
    8 => Float32x4
];

/// One catalogue mesh on the GPU: triangles plus a line list of its edges.
pub(crate) struct GpuMesh {
    pub(crate) vertices: wgpu::Buffer,
    pub(crate) indices: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) edges: wgpu::Buffer,
    pub(crate) edge_count: u32,
}

pub(crate) fn upload_meshes(device: &wgpu::Device, shapes: &[Shape]) -> Vec<GpuMesh> {
    let meshes: Vec<GpuMesh> = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let data = shape.build();
            let edges = data.edges();
            GpuMesh {
                vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("mesh{}_vb", i)),
                    contents: bytemuck::cast_slice(&data.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("mesh{}_ib", i)),
                    contents: bytemuck::cast_slice(&data.indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                index_count: data.indices.len() as u32,
                edges: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("mesh{}_edges", i)),
                    contents: bytemuck::cast_slice(&edges),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                edge_count: edges.len() as u32,
            }
        })
        .collect();
    let triangles: u32 = meshes.iter().map(|m| m.index_count / 3).sum();
    log::info!("[gpu] uploaded meshes={} triangles={}", meshes.len(), triangles);
    meshes
}

pub(crate) struct MeshPipelines {
    pub(crate) opaque: wgpu::RenderPipeline,
    pub(crate) wireframe: wgpu::RenderPipeline,
    pub(crate) transparent: wgpu::RenderPipeline,
}

fn mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    let buffers = [
        // slot 0: mesh vertices
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        // slot 1: instance data
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshInstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(helpers::depth_state(depth_write)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: helpers::HDR_FORMAT,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub(crate) fn create_mesh_pipelines(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    scene_bgl: &wgpu::BindGroupLayout,
) -> MeshPipelines {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_mesh"),
        bind_group_layouts: &[scene_bgl],
        push_constant_ranges: &[],
    });
    MeshPipelines {
        opaque: mesh_pipeline(
            device,
            &layout,
            shader,
            "mesh_opaque",
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::BlendState::REPLACE,
            true,
        ),
        wireframe: mesh_pipeline(
            device,
            &layout,
            shader,
            "mesh_wireframe",
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::ALPHA_BLENDING,
            true,
        ),
        transparent: mesh_pipeline(
            device,
            &layout,
            shader,
            "mesh_transparent",
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::BlendState::ALPHA_BLENDING,
            false,
        ),
    }
}
