//! Typed descriptors for the WGSL programs.
//!
//! Every program lists the uniform blocks it reads and the semantic role of
//! each field. `ShaderProgram::validate` checks the descriptor against the
//! WGSL text, so a renamed or reordered uniform fails the test suite instead
//! of silently reading garbage on the GPU. Block sizes come from the Rust
//! `Pod` structs in `types`, which are size-checked at compile time.

use std::num::NonZeroU64;

use crate::types::{CameraUniform, HologramUniform, LightsUniform, ModelUniform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformRole {
    ElapsedTime,
    LightPosition(u8),
    LightColor(u8),
    ViewProjection,
    CameraPosition,
    ModelMatrix,
    InverseModel,
    NormalMatrix,
    FrameSize,
    ViewportSize,
    NearClip,
    FarClip,
    PointSize,
    DepthOffset,
    DepthToX,
    DepthToY,
    Padding,
}

#[derive(Debug, Clone, Copy)]
pub struct UniformField {
    pub name: &'static str,
    pub role: UniformRole,
}

const fn field(name: &'static str, role: UniformRole) -> UniformField {
    UniformField { name, role }
}

#[derive(Debug)]
pub struct UniformBlock {
    pub struct_name: &'static str,
    pub group: u32,
    pub binding: u32,
    pub size: u64,
    pub fields: &'static [UniformField],
}

impl UniformBlock {
    /// First field whose role was already claimed by an earlier field
    fn duplicate_role(&self) -> Option<&UniformField> {
        self.fields.iter().enumerate().find_map(|(i, f)| {
            let repeated = f.role != UniformRole::Padding && self.fields[..i].iter().any(|g| g.role == f.role);
            repeated.then_some(f)
        })
    }

    pub fn layout_entry(&self, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding: self.binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(self.size),
            },
            count: None,
        }
    }
}

pub static LIGHTS_BLOCK: UniformBlock = UniformBlock {
    struct_name: "Lights",
    group: 0,
    binding: 0,
    size: std::mem::size_of::<LightsUniform>() as u64,
    fields: &[
        field("l1_position", UniformRole::LightPosition(0)),
        field("time", UniformRole::ElapsedTime),
        field("l2_position", UniformRole::LightPosition(1)),
        field("_pad0", UniformRole::Padding),
        field("l1_color", UniformRole::LightColor(0)),
        field("_pad1", UniformRole::Padding),
        field("l2_color", UniformRole::LightColor(1)),
        field("_pad2", UniformRole::Padding),
    ],
};

pub static CAMERA_BLOCK: UniformBlock = UniformBlock {
    struct_name: "Camera",
    group: 0,
    binding: 1,
    size: std::mem::size_of::<CameraUniform>() as u64,
    fields: &[
        field("view_proj", UniformRole::ViewProjection),
        field("position", UniformRole::CameraPosition),
        field("_pad0", UniformRole::Padding),
    ],
};

pub static MODEL_BLOCK: UniformBlock = UniformBlock {
    struct_name: "Model",
    group: 1,
    binding: 0,
    size: std::mem::size_of::<ModelUniform>() as u64,
    fields: &[
        field("model", UniformRole::ModelMatrix),
        field("inverse_model", UniformRole::InverseModel),
        field("normal_matrix", UniformRole::NormalMatrix),
    ],
};

pub static HOLOGRAM_BLOCK: UniformBlock = UniformBlock {
    struct_name: "Hologram",
    group: 0,
    binding: 0,
    size: std::mem::size_of::<HologramUniform>() as u64,
    fields: &[
        field("view_proj", UniformRole::ViewProjection),
        field("frame_size", UniformRole::FrameSize),
        field("viewport", UniformRole::ViewportSize),
        field("near", UniformRole::NearClip),
        field("far", UniformRole::FarClip),
        field("point_size", UniformRole::PointSize),
        field("z_offset", UniformRole::DepthOffset),
        field("x_to_z", UniformRole::DepthToX),
        field("y_to_z", UniformRole::DepthToY),
        field("_pad", UniformRole::Padding),
    ],
};

#[derive(Debug)]
pub struct ShaderProgram {
    pub label: &'static str,
    pub source: &'static str,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
    pub blocks: &'static [&'static UniformBlock],
}

pub static TROPHY_BODY: ShaderProgram = ShaderProgram {
    label: "Trophy Body Shader",
    source: include_str!("trophy_body.wgsl"),
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
    blocks: &[&LIGHTS_BLOCK, &CAMERA_BLOCK, &MODEL_BLOCK],
};

pub static PLINTH: ShaderProgram = ShaderProgram {
    label: "Plinth Shader",
    source: include_str!("plinth.wgsl"),
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
    blocks: &[&LIGHTS_BLOCK, &CAMERA_BLOCK, &MODEL_BLOCK],
};

pub static LIGHT_MARKER: ShaderProgram = ShaderProgram {
    label: "Light Marker Shader",
    source: include_str!("light_marker.wgsl"),
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
    blocks: &[&LIGHTS_BLOCK, &CAMERA_BLOCK],
};

pub static HOLOGRAM: ShaderProgram = ShaderProgram {
    label: "Hologram Shader",
    source: include_str!("hologram.wgsl"),
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
    blocks: &[&HOLOGRAM_BLOCK],
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ShaderError {
    #[error("{program}: entry point `{entry}` not found")]
    MissingEntryPoint { program: &'static str, entry: &'static str },
    #[error("{program}: struct `{name}` not found")]
    MissingStruct { program: &'static str, name: &'static str },
    #[error("{program}: struct `{name}` declares {found:?}, descriptor expects {expected:?}")]
    FieldMismatch {
        program: &'static str,
        name: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("{program}: `{name}.{field}` repeats a role already bound in the block")]
    DuplicateRole {
        program: &'static str,
        name: &'static str,
        field: &'static str,
    },
    #[error("{program}: no uniform binding @group({group}) @binding({binding}) of type `{name}`")]
    MissingBinding {
        program: &'static str,
        name: &'static str,
        group: u32,
        binding: u32,
    },
}

/// Field names of `struct <name> { ... }` in declaration order
fn struct_fields(source: &str, name: &str) -> Option<Vec<String>> {
    let header = format!("struct {} {{", name);
    let start = source.find(&header)? + header.len();
    let end = start + source[start..].find('}')?;

    Some(
        source[start..end]
            .split(',')
            .filter_map(|decl| {
                let decl = decl.trim();
                let (name, _) = decl.split_once(':')?;
                Some(name.trim().to_string())
            })
            .collect(),
    )
}

impl ShaderProgram {
    pub fn validate(&self) -> Result<(), ShaderError> {
        for entry in [self.vertex_entry, self.fragment_entry] {
            if !self.source.contains(&format!("fn {}(", entry)) {
                return Err(ShaderError::MissingEntryPoint { program: self.label, entry });
            }
        }

        for block in self.blocks {
            if let Some(f) = block.duplicate_role() {
                return Err(ShaderError::DuplicateRole {
                    program: self.label,
                    name: block.struct_name,
                    field: f.name,
                });
            }

            let found = struct_fields(self.source, block.struct_name).ok_or(ShaderError::MissingStruct {
                program: self.label,
                name: block.struct_name,
            })?;
            let expected: Vec<String> = block.fields.iter().map(|f| f.name.to_string()).collect();
            if found != expected {
                return Err(ShaderError::FieldMismatch {
                    program: self.label,
                    name: block.struct_name,
                    expected,
                    found,
                });
            }

            let binding = format!("@group({}) @binding({}) var<uniform>", block.group, block.binding);
            let ty = format!(": {};", block.struct_name);
            let bound = self
                .source
                .lines()
                .any(|line| line.contains(&binding) && line.trim_end().ends_with(&ty));
            if !bound {
                return Err(ShaderError::MissingBinding {
                    program: self.label,
                    name: block.struct_name,
                    group: block.group,
                    binding: block.binding,
                });
            }
        }

        Ok(())
    }

    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label),
            source: wgpu::ShaderSource::Wgsl(self.source.into()),
        })
    }
}
