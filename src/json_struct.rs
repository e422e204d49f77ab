use serde::Deserialize;

use crate::renderer::RenderMode;

#[derive(Debug, Deserialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub window: WindowConfig,
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub render: RenderConfig,
    pub models: Vec<ModelConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub fps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "scanline-renderer".to_string(),
            width: 800,
            height: 800,
            fps: 60,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// 与 forward 二选一
    #[serde(default)]
    pub target: Option<[f32; 3]>,
    #[serde(default)]
    pub forward: Option<[f32; 3]>,
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// 角度制
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fov() -> f32 {
    60.0
}

fn default_near() -> f32 {
    1.0
}

fn default_far() -> f32 {
    50.0
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub direction: [f32; 3],
    pub color: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub specular_exponent: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: [0.0, 0.0, 1.0],
            color: [255.0, 255.0, 255.0],
            ambient: 0.1,
            diffuse: 0.6,
            specular: 0.3,
            specular_exponent: 10.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mode: RenderMode,
    pub wireframe: bool,
    pub output: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Textured,
            wireframe: false,
            output: "output.png".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    pub path: String,
    #[serde(default)]
    pub tex_path: Option<String>,
    /// 没有贴图文件时用随机噪声纹理 [宽, 高]
    #[serde(default)]
    pub noise_texture: Option<[usize; 2]>,
    #[serde(default)]
    pub position: [f32; 3],
    /// 弧度
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
