pub mod camera;
pub mod framebuffer;
pub mod json_struct;
pub mod model;
pub mod rasterizer;
pub mod renderer;
pub mod renderer_debug;
pub mod texture;
pub mod transform;
pub mod vertex;

pub use camera::{Camera, Look};
pub use framebuffer::{FrameBuffer, Rgb};
pub use model::{Face, Mesh, load_obj};
pub use renderer::light::{Light, LightIntensity};
pub use renderer::{FrameStats, RenderMode, Renderer};
pub use texture::Texture;
