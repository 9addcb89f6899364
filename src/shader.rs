use crate::error::{Result, TrigridError};
use std::{borrow::Cow, fmt, fs, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl From<ShaderStage> for naga::ShaderStage {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// GLSL 4.50 text for one pipeline stage.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub label: String,
    pub stage: ShaderStage,
    pub text: String,
}

impl ShaderSource {
    pub fn inline(label: &str, stage: ShaderStage, text: &str) -> Self {
        Self {
            label: label.to_owned(),
            stage,
            text: text.to_owned(),
        }
    }

    /// Reads the whole file as the shader text. The path is resolved against
    /// the working directory.
    pub fn from_file(path: impl AsRef<Path>, stage: ShaderStage) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TrigridError::ShaderSource {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded {stage} shader {}", path.display());

        Ok(Self {
            label: path.display().to_string(),
            stage,
            text,
        })
    }

    /// Parses and validates the source, returning the diagnostic log on failure.
    pub fn check(&self) -> Result<()> {
        let options = naga::front::glsl::Options::from(naga::ShaderStage::from(self.stage));
        let module = naga::front::glsl::Frontend::default()
            .parse(&options, &self.text)
            .map_err(|errors| {
                let log = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                self.compile_error(log)
            })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .map_err(|err| self.compile_error(err.emit_to_string(&self.text)))?;

        Ok(())
    }

    fn compile_error(&self, log: String) -> TrigridError {
        TrigridError::ShaderCompile {
            label: self.label.clone(),
            log,
        }
    }

    /// Compiles the source into a device module.
    ///
    /// Failures are logged and yield `None`; the caller keeps running without
    /// a pipeline.
    pub fn create_module(&self, device: &wgpu::Device) -> Option<wgpu::ShaderModule> {
        if let Err(err) = self.check() {
            log::error!("{err}");
            return None;
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.label),
            source: wgpu::ShaderSource::Glsl {
                shader: Cow::Borrowed(&self.text),
                stage: self.stage.into(),
                defines: Default::default(),
            },
        });

        match pollster::block_on(device.pop_error_scope()) {
            Some(err) => {
                log::error!("{}", self.compile_error(err.to_string()));
                None
            }
            None => Some(module),
        }
    }
}
