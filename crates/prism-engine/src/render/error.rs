use std::fmt;

use prism_layout::TemplateError;

/// Failures while building renderer state.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererError {
    /// The vertex descriptor does not describe a usable buffer/attribute layout.
    BadVertexDescriptor(String),
    /// Shader source could not be assembled from its template.
    ShaderTemplate(TemplateError),
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererError::BadVertexDescriptor(why) => write!(f, "bad vertex descriptor: {why}"),
            RendererError::ShaderTemplate(e) => write!(f, "shader source: {e}"),
        }
    }
}

impl std::error::Error for RendererError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RendererError::ShaderTemplate(e) => Some(e),
            RendererError::BadVertexDescriptor(_) => None,
        }
    }
}

impl From<TemplateError> for RendererError {
    fn from(e: TemplateError) -> Self {
        RendererError::ShaderTemplate(e)
    }
}
