use anyhow::Context;
use image::imageops;
use rand::Rng;
use std::path::Path;

use crate::framebuffer::Rgb;

/// 只读 RGB 纹理，行优先存储，(0, 0) 为左下角
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    data: Vec<Rgb>,
}

impl Texture {
    /// 纯色纹理；宽高至少为 1
    pub fn new(width: usize, height: usize, color: Rgb) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            data: vec![color; width * height],
        }
    }

    /// `data` 按行排列，长度必须为 width * height
    pub fn from_rgb(width: usize, height: usize, data: Vec<Rgb>) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("无法读取纹理 {}", path.display()))?
            .to_rgb8();
        // 图片第一行在顶部，而 v = 0 对应底部
        let img = imageops::flip_vertical(&img);
        let (width, height) = img.dimensions();
        let data = img.pixels().map(|p| p.0).collect();
        Self::from_rgb(width as usize, height as usize, data)
            .with_context(|| format!("纹理尺寸为零: {}", path.display()))
    }

    /// 随机噪声纹理；宽高至少为 1
    pub fn random(width: usize, height: usize) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let mut rng = rand::rng();
        let data = (0..width * height)
            .map(|_| [rng.random(), rng.random(), rng.random()])
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn texel(&self, x: usize, y: usize) -> Rgb {
        self.data[y * self.width + x]
    }

    /// 最近邻采样，u、v 先截断到 [0, 1]
    pub fn sample(&self, u: f32, v: f32) -> Rgb {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = ((u * self.width as f32) as usize).min(self.width - 1);
        let y = ((v * self.height as f32) as usize).min(self.height - 1);

        self.texel(x, y)
    }
}
