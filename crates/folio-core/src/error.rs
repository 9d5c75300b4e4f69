use thiserror::Error;

/// Configuration problems detected before a scene is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("smoothing factor must be in (0, 1], got {0}")]
    SmoothingFactor(f32),
    #[error("reference frame rate must be positive, got {0}")]
    ReferenceFps(f32),
    #[error("particle extent must be positive, got {0}")]
    ParticleExtent(f32),
    #[error("field of view must be in (0, 180) degrees, got {0}")]
    FieldOfView(f32),
}
