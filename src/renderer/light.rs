use cgmath::{InnerSpace, Vector3 as Vec3};

use crate::framebuffer::Rgb;
use crate::transform::normalize_or_zero;

/// 一个面在质心处算出的三项光照强度，光栅化时对整个面复用
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightIntensity {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

/// 单一平行光 + 环境光/漫反射/高光系数
#[derive(Debug, Clone, Copy)]
pub struct Light {
    direction: Vec3<f32>,
    /// 0..255
    pub color: Vec3<f32>,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub specular_exponent: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, 1.0),
            color: Vec3::new(255.0, 255.0, 255.0),
            ambient: 0.1,
            diffuse: 0.6,
            specular: 0.3,
            specular_exponent: 10.0,
        }
    }
}

impl Light {
    pub fn direction(&self) -> Vec3<f32> {
        self.direction
    }

    pub fn set_light(&mut self, color: [f32; 3], direction: [f32; 3]) {
        self.color = Vec3::from(color);
        self.direction = normalize_or_zero(Vec3::from(direction));
    }

    pub fn set_coefficients(&mut self, ambient: f32, diffuse: f32, specular: f32, exponent: f32) {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self.specular_exponent = exponent;
    }

    pub fn intensity(
        &self,
        normal: Vec3<f32>,
        point: Vec3<f32>,
        camera_pos: Vec3<f32>,
    ) -> LightIntensity {
        let to_light = -self.direction;
        let diffuse = self.diffuse * normal.dot(to_light).max(0.0);

        // 半程向量
        let view_dir = normalize_or_zero(camera_pos - point);
        let half_dir = normalize_or_zero(view_dir + to_light);
        let specular =
            self.specular * normal.dot(half_dir).max(0.0).powf(self.specular_exponent);

        LightIntensity {
            ambient: self.ambient,
            diffuse,
            specular,
        }
    }

    /// base·(ambient + diffuse) + light·specular，逐通道截断到 [0, 255]
    pub fn color(&self, intensity: LightIntensity, base: Rgb) -> Rgb {
        let base = Vec3::new(base[0] as f32, base[1] as f32, base[2] as f32);
        let lit = base * (intensity.ambient + intensity.diffuse) + self.color * intensity.specular;
        [
            lit.x.clamp(0.0, 255.0) as u8,
            lit.y.clamp(0.0, 255.0) as u8,
            lit.z.clamp(0.0, 255.0) as u8,
        ]
    }
}
