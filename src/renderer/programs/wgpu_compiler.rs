//! wgpu Program Compiler
//!
//! Compiles WGSL variants into `wgpu::ShaderModule` pairs.
//!
//! wgpu reports shader errors through the device's uncaptured-error handler,
//! which panics by default. Both stages are therefore parsed and validated with
//! naga first, so a broken variant surfaces as
//! [`ProgramError::InvalidShader`] from `acquire` instead of taking the device
//! down.

use std::borrow::Cow;

use crate::errors::{ProgramError, Result, ShaderStage};
use crate::renderer::programs::compiler::{ProgramCompiler, ShaderSource};
use crate::renderer::programs::parameters::ProgramParameters;
use crate::renderer::programs::program_key::ProgramKey;
use crate::resources::material::Material;

/// A compiled vertex/fragment module pair.
#[derive(Debug)]
pub struct GpuProgram {
    pub label: String,
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
}

/// [`ProgramCompiler`] backed by a `wgpu::Device`.
pub struct WgpuProgramCompiler {
    device: wgpu::Device,
}

impl WgpuProgramCompiler {
    #[must_use]
    pub fn new(device: wgpu::Device) -> Self {
        Self { device }
    }

    #[must_use]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    fn create_module(&self, label: &str, source: &str) -> wgpu::ShaderModule {
        self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(source.to_owned())),
        })
    }
}

impl ProgramCompiler for WgpuProgramCompiler {
    type Program = GpuProgram;

    fn compile(
        &mut self,
        key: &ProgramKey,
        _material: &Material,
        source: &ShaderSource,
        parameters: &ProgramParameters,
    ) -> Result<GpuProgram> {
        let label = key.label();

        validate_wgsl(ShaderStage::Vertex, &source.vertex)?;
        validate_wgsl(ShaderStage::Fragment, &source.fragment)?;

        log::debug!(
            "Compiling program {label} ({}, {})",
            source.name,
            parameters.precision
        );

        let vertex = self.create_module(&format!("{label} vs"), &source.vertex);
        let fragment = self.create_module(&format!("{label} fs"), &source.fragment);

        Ok(GpuProgram {
            label,
            vertex,
            fragment,
        })
    }

    fn destroy(&mut self, program: GpuProgram) {
        log::debug!("Destroying program {}", program.label);
    }
}

/// Parses and validates one WGSL stage.
///
/// The module must contain at least one entry point for `stage`.
pub fn validate_wgsl(stage: ShaderStage, source: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ProgramError::InvalidShader {
        stage,
        message: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| ProgramError::InvalidShader {
        stage,
        message: e.emit_to_string(source),
    })?;

    let wanted = match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Fragment => naga::ShaderStage::Fragment,
    };
    if !module.entry_points.iter().any(|ep| ep.stage == wanted) {
        return Err(ProgramError::InvalidShader {
            stage,
            message: format!("no {stage} entry point"),
        });
    }

    Ok(())
}
