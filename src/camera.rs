use cgmath::{InnerSpace, Matrix4 as Mat4, Vector3 as Vec3};

use crate::transform::normalize_or_zero;

/// 透视投影参数；裁剪空间透视除法后 z ∈ [0, 1]，x、y ∈ [-1, 1]
#[derive(Debug, Clone)]
pub struct Frustum {
    near: f32,
    aspect: f32,
    fovy: f32,
    far: f32,
    mat: Mat4<f32>,
}

impl Frustum {
    #[rustfmt::skip]
    pub fn new(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fovy / 2.0).tan();
        let a = f / aspect;
        let c = far / (far - near);
        let d = -far * near / (far - near);

        // cgmath 按列传参，第三列最后一项即 w 行的 z 分量
        let mat = Mat4::new(
            a,    0.0,   0.0,   0.0,
            0.0,  f,     0.0,   0.0,
            0.0,  0.0,   c,     1.0,
            0.0,  0.0,   d,     0.0,
        );

        Self {
            near,
            aspect,
            fovy,
            far,
            mat,
        }
    }

    pub fn get_mat(&self) -> &Mat4<f32> {
        &self.mat
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }
}

/// 相机朝向的两种给法
#[derive(Debug, Clone, Copy)]
pub enum Look {
    /// 直接给出前向向量
    Along(Vec3<f32>),
    /// 给出注视点，前向为 target - eye
    At(Vec3<f32>),
}

/// 相机：位置 + 正交基 {right, up, forward} + 投影
#[derive(Debug, Clone)]
pub struct Camera {
    frustum: Frustum,
    pub(crate) position: Vec3<f32>,
    pub(crate) right: Vec3<f32>,
    pub(crate) up: Vec3<f32>,
    pub(crate) forward: Vec3<f32>,
}

impl Camera {
    /// 位于原点、沿 +z 观察、+y 向上
    pub fn new(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            frustum: Frustum::new(fovy, aspect, near, far),
            position: Vec3::new(0.0, 0.0, 0.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            forward: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    pub fn get_frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn position(&self) -> Vec3<f32> {
        self.position
    }

    pub fn basis(&self) -> [Vec3<f32>; 3] {
        [self.right, self.up, self.forward]
    }

    pub fn set_position(&mut self, position: Vec3<f32>) {
        self.position = position;
    }

    /// 窗口尺寸变化时重建投影矩阵
    pub fn set_aspect(&mut self, aspect: f32) {
        let f = &self.frustum;
        self.frustum = Frustum::new(f.fovy, aspect, f.near, f.far);
    }

    /// 重新设定位置和朝向。
    ///
    /// 退化输入（前向为零、up 与前向平行）得到零向量基，不做检查。
    pub fn orient(&mut self, eye: Vec3<f32>, look: Look, up_hint: Vec3<f32>) {
        self.position = eye;
        let forward = match look {
            Look::Along(dir) => dir,
            Look::At(target) => target - eye,
        };
        self.forward = normalize_or_zero(forward);
        self.right = normalize_or_zero(up_hint.cross(self.forward));
        self.up = self.forward.cross(self.right);
    }

    /// 世界空间 → 相机空间
    #[rustfmt::skip]
    pub fn view_matrix(&self) -> Mat4<f32> {
        let (r, u, f) = (self.right, self.up, self.forward);
        let p = self.position;
        // 每一行是一个基向量，平移项为 -dot(position, basis)
        Mat4::new(
            r.x,        u.x,        f.x,        0.0,
            r.y,        u.y,        f.y,        0.0,
            r.z,        u.z,        f.z,        0.0,
            -p.dot(r),  -p.dot(u),  -p.dot(f),  1.0,
        )
    }

    pub fn projection_matrix(&self) -> Mat4<f32> {
        *self.frustum.get_mat()
    }

    pub fn view_proj_matrix(&self) -> Mat4<f32> {
        self.frustum.get_mat() * self.view_matrix()
    }
}
