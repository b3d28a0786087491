//! Compilation inputs supplied by the embedding compiler: shader stage, spec profile, and host resources.
//!
//! `ShaderResources` is the capability/limit struct a graphics stack fills in for its GPU. It is read-only to the
//! builder. Hosts that keep it in a file can load it as JSON; every field is optional and defaults to the GLSL ES
//! 1.00 minimums.

use std::fmt;
use std::path::Path;

use glint_core::lang::builtins::{Capability, ResourceLimit};
use serde::{Deserialize, Serialize};

use super::errors::{BuiltinError, ConfigError};

/// Pipeline stage a shader is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    Compute,
}

impl ShaderStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Compute => "compute",
        }
    }

    /// Reject stages that have no builtin environment in this language version.
    pub fn ensure_supported(self) -> Result<(), BuiltinError> {
        match self {
            ShaderStage::Vertex | ShaderStage::Fragment => Ok(()),
            ShaderStage::Geometry | ShaderStage::Compute => Err(BuiltinError::UnsupportedStage(self)),
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant of the builtin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SpecProfile {
    /// OpenGL ES 2.0.
    #[default]
    Standard,
    /// WebGL 1.0. Same builtin surface as `Standard`.
    WebGl,
    /// CSS Shaders: no fragment outputs, plus the `css_*` blend inputs.
    CssShaders,
}

impl SpecProfile {
    pub const fn as_str(self) -> &'static str {
        match self {
            SpecProfile::Standard => "standard",
            SpecProfile::WebGl => "web-gl",
            SpecProfile::CssShaders => "css-shaders",
        }
    }

    pub const fn is_css_shaders(self) -> bool {
        matches!(self, SpecProfile::CssShaders)
    }
}

impl fmt::Display for SpecProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host capabilities and limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShaderResources {
    pub supports_standard_derivatives: bool,
    pub supports_external_images: bool,
    pub supports_texture_rectangle: bool,
    pub supports_multiple_draw_buffers: bool,
    pub supports_fragment_depth_extension: bool,
    pub high_fragment_precision_available: bool,

    pub max_vertex_attribs: u32,
    pub max_vertex_uniform_vectors: u32,
    pub max_varying_vectors: u32,
    pub max_vertex_texture_image_units: u32,
    pub max_combined_texture_image_units: u32,
    pub max_texture_image_units: u32,
    pub max_fragment_uniform_vectors: u32,
    pub max_draw_buffers: u32,
}

impl Default for ShaderResources {
    fn default() -> Self {
        Self {
            supports_standard_derivatives: false,
            supports_external_images: false,
            supports_texture_rectangle: false,
            supports_multiple_draw_buffers: false,
            supports_fragment_depth_extension: false,
            high_fragment_precision_available: false,
            max_vertex_attribs: 8,
            max_vertex_uniform_vectors: 128,
            max_varying_vectors: 8,
            max_vertex_texture_image_units: 0,
            max_combined_texture_image_units: 8,
            max_texture_image_units: 8,
            max_fragment_uniform_vectors: 16,
            max_draw_buffers: 1,
        }
    }
}

impl ShaderResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_standard_derivatives(mut self, on: bool) -> Self {
        self.supports_standard_derivatives = on;
        self
    }

    pub fn with_external_images(mut self, on: bool) -> Self {
        self.supports_external_images = on;
        self
    }

    pub fn with_texture_rectangle(mut self, on: bool) -> Self {
        self.supports_texture_rectangle = on;
        self
    }

    /// Enable GL_EXT_draw_buffers with `max` outputs.
    pub fn with_draw_buffers(mut self, max: u32) -> Self {
        self.supports_multiple_draw_buffers = true;
        self.max_draw_buffers = max;
        self
    }

    pub fn with_fragment_depth(mut self, on: bool) -> Self {
        self.supports_fragment_depth_extension = on;
        self
    }

    pub fn with_high_fragment_precision(mut self, on: bool) -> Self {
        self.high_fragment_precision_available = on;
        self
    }

    /// Whether the host advertises `capability`.
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::StandardDerivatives => self.supports_standard_derivatives,
            Capability::ExternalImages => self.supports_external_images,
            Capability::TextureRectangle => self.supports_texture_rectangle,
        }
    }

    /// Value of an implementation-defined limit.
    pub fn limit(&self, limit: ResourceLimit) -> u32 {
        match limit {
            ResourceLimit::MaxVertexAttribs => self.max_vertex_attribs,
            ResourceLimit::MaxVertexUniformVectors => self.max_vertex_uniform_vectors,
            ResourceLimit::MaxVaryingVectors => self.max_varying_vectors,
            ResourceLimit::MaxVertexTextureImageUnits => self.max_vertex_texture_image_units,
            ResourceLimit::MaxCombinedTextureImageUnits => self.max_combined_texture_image_units,
            ResourceLimit::MaxTextureImageUnits => self.max_texture_image_units,
            ResourceLimit::MaxFragmentUniformVectors => self.max_fragment_uniform_vectors,
            ResourceLimit::MaxDrawBuffers => self.max_draw_buffers,
        }
    }

    /// Check limits that the builder relies on.
    ///
    /// ## Notes
    /// - `max_draw_buffers` sizes `gl_FragData`; zero would make it a non-array.
    /// - Limits are exposed as `const int`, so they must fit in `i32`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_draw_buffers == 0 {
            return Err(ConfigError::Invalid("max_draw_buffers must be at least 1".to_string()));
        }
        if !self.supports_multiple_draw_buffers && self.max_draw_buffers > 1 {
            return Err(ConfigError::Invalid(
                "max_draw_buffers > 1 requires supports_multiple_draw_buffers".to_string(),
            ));
        }
        let limits = [
            ResourceLimit::MaxVertexAttribs,
            ResourceLimit::MaxVertexUniformVectors,
            ResourceLimit::MaxVaryingVectors,
            ResourceLimit::MaxVertexTextureImageUnits,
            ResourceLimit::MaxCombinedTextureImageUnits,
            ResourceLimit::MaxTextureImageUnits,
            ResourceLimit::MaxFragmentUniformVectors,
            ResourceLimit::MaxDrawBuffers,
        ];
        if let Some(limit) = limits.into_iter().find(|l| i32::try_from(self.limit(*l)).is_err()) {
            return Err(ConfigError::Invalid(format!("{limit:?} does not fit in a GLSL int")));
        }
        Ok(())
    }

    /// Parse and validate resources from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let resources: ShaderResources = serde_json::from_str(json)?;
        resources.validate()?;
        Ok(resources)
    }

    /// Read, parse and validate a resources file.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let resources = Self::from_json_str(&json)?;
        tracing::debug!(?resources, "loaded shader resources");
        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gles2_minimums() {
        let r = ShaderResources::default();
        assert_eq!(r.max_vertex_attribs, 8);
        assert_eq!(r.max_fragment_uniform_vectors, 16);
        assert_eq!(r.max_draw_buffers, 1);
        assert!(!r.supports_standard_derivatives);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn json_fields_are_optional() {
        let r = ShaderResources::from_json_str(r#"{"supports_standard_derivatives": true}"#).unwrap();
        assert!(r.supports_standard_derivatives);
        assert_eq!(r.max_texture_image_units, 8);
    }

    #[test]
    fn unknown_json_fields_are_rejected() {
        let err = ShaderResources::from_json_str(r#"{"max_draw_bufers": 4}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn zero_draw_buffers_is_invalid() {
        let err = ShaderResources::from_json_str(r#"{"max_draw_buffers": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn draw_buffers_need_the_extension() {
        let r = ShaderResources {
            max_draw_buffers: 4,
            ..ShaderResources::default()
        };
        assert!(r.validate().is_err());
        assert!(ShaderResources::new().with_draw_buffers(4).validate().is_ok());
    }

    #[test]
    fn only_vertex_and_fragment_are_supported() {
        assert!(ShaderStage::Vertex.ensure_supported().is_ok());
        assert!(ShaderStage::Fragment.ensure_supported().is_ok());
        assert!(matches!(
            ShaderStage::Geometry.ensure_supported(),
            Err(BuiltinError::UnsupportedStage(ShaderStage::Geometry))
        ));
    }

    #[test]
    fn limits_map_to_fields() {
        let r = ShaderResources::new().with_draw_buffers(4);
        assert_eq!(r.limit(ResourceLimit::MaxDrawBuffers), 4);
        assert_eq!(r.limit(ResourceLimit::MaxVaryingVectors), 8);
    }
}
