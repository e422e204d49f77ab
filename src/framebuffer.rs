use std::path::Path;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const WHITE: Rgb = [255, 255, 255];

/// 深度缓冲初始值（远平面）
pub const FAR_DEPTH: f32 = 1.0;

/// 每帧重新分配的颜色缓冲 + 深度缓冲
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Rgb>,
    pub depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            data: vec![BLACK; width * height],
            depth: vec![FAR_DEPTH; width * height],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// 越界像素直接跳过；深度严格更小时才写入颜色和深度
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgb, depth: f32) -> bool {
        self.put_pixel_with(x, y, depth, || color)
    }

    /// 同 `put_pixel`，颜色只在通过深度测试后才计算
    pub fn put_pixel_with(
        &mut self,
        x: i32,
        y: i32,
        depth: f32,
        color: impl FnOnce() -> Rgb,
    ) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if depth < self.depth[idx] {
            self.depth[idx] = depth;
            self.data[idx] = color();
            true
        } else {
            false
        }
    }

    /// 只写深度
    pub fn put_depth(&mut self, x: i32, y: i32, depth: f32) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if depth < self.depth[idx] {
            self.depth[idx] = depth;
            true
        } else {
            false
        }
    }

    /// 不做深度测试，直接覆盖颜色（线框叠加用）
    pub fn set_color(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Rgb {
        self.data[y * self.width + x]
    }

    pub fn get_depth(&self, x: usize, y: usize) -> f32 {
        self.depth[y * self.width + x]
    }

    // 深度可视化：近→亮，远→暗，背景为黑色
    pub fn visualize_depth(&mut self) {
        for (color, &depth) in self.data.iter_mut().zip(&self.depth) {
            let val = ((1.0 - depth) * 255.0).clamp(0.0, 255.0) as u8;
            *color = [val, val, val];
        }
    }

    /// 0RGB 打包，给窗口显示用
    pub fn to_argb(&self) -> Vec<u32> {
        self.data
            .iter()
            .map(|&[r, g, b]| (r as u32) << 16 | (g as u32) << 8 | b as u32)
            .collect()
    }

    pub fn save_to_image(&self, filepath: &Path) -> Result<(), image::ImageError> {
        use image::{ImageBuffer, Rgb as Pixel};

        let img = ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            Pixel(self.get_pixel(x as usize, y as usize))
        });
        img.save(filepath)
    }
}
