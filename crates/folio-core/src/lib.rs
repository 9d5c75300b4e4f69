pub mod animation;
pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod objects;
pub mod particles;
pub mod scene;
pub mod scroll;

pub use camera::*;
pub use config::*;
pub use error::SceneError;
pub use layout::*;
pub use objects::*;
pub use scene::*;
pub use scroll::*;
