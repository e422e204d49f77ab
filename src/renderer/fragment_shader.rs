use cgmath::Vector2 as Vec2;

use crate::framebuffer::Rgb;
use crate::renderer::light::{Light, LightIntensity};
use crate::texture::Texture;

/// 纹理或 UV 缺失时的占位色
pub const PLACEHOLDER: Rgb = [255, 0, 255];

#[derive(Debug, Clone, Copy)]
pub struct FragmentData {
    pub uv: Option<Vec2<f32>>,
    pub intensity: LightIntensity,
}

// 定义逐像素取色的通用行为
pub trait FragmentShader {
    fn shade(&self, data: FragmentData) -> Rgb;
}

/// 整个面同一个颜色
pub struct FlatShader {
    pub color: Rgb,
}

impl FragmentShader for FlatShader {
    fn shade(&self, _data: FragmentData) -> Rgb {
        self.color
    }
}

/// 最近邻纹理采样，再叠加面光照
pub struct TextureShader<'a> {
    pub light: &'a Light,
    pub texture: Option<&'a Texture>,
    /// 没有纹理或 UV 时使用（已含光照）
    pub fallback: Rgb,
}

impl FragmentShader for TextureShader<'_> {
    fn shade(&self, data: FragmentData) -> Rgb {
        match (self.texture, data.uv) {
            (Some(tex), Some(uv)) => self.light.color(data.intensity, tex.sample(uv.x, uv.y)),
            _ => self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: LightIntensity = LightIntensity {
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
    };

    #[test]
    fn flat_ignores_fragment() {
        let shader = FlatShader { color: [1, 2, 3] };
        let data = FragmentData {
            uv: Some(Vec2::new(0.5, 0.5)),
            intensity: FULL,
        };
        assert_eq!(shader.shade(data), [1, 2, 3]);
    }

    #[test]
    fn texture_sample_is_lit() {
        let light = Light::default();
        let tex = Texture::from_rgb(2, 1, vec![[10, 20, 30], [200, 100, 50]]).unwrap();
        let shader = TextureShader {
            light: &light,
            texture: Some(&tex),
            fallback: PLACEHOLDER,
        };
        let half = LightIntensity {
            ambient: 0.5,
            diffuse: 0.0,
            specular: 0.0,
        };
        let data = FragmentData {
            uv: Some(Vec2::new(0.9, 0.0)),
            intensity: half,
        };
        assert_eq!(shader.shade(data), [100, 50, 25]);
    }

    #[test]
    fn missing_uv_or_texture_falls_back() {
        let light = Light::default();
        let tex = Texture::new(1, 1, [9, 9, 9]);
        let with_tex = TextureShader {
            light: &light,
            texture: Some(&tex),
            fallback: PLACEHOLDER,
        };
        let no_uv = FragmentData {
            uv: None,
            intensity: FULL,
        };
        assert_eq!(with_tex.shade(no_uv), PLACEHOLDER);

        let without_tex = TextureShader {
            light: &light,
            texture: None,
            fallback: [1, 1, 1],
        };
        let with_uv = FragmentData {
            uv: Some(Vec2::new(0.0, 0.0)),
            intensity: FULL,
        };
        assert_eq!(without_tex.shade(with_uv), [1, 1, 1]);
    }
}
