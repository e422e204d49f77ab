use cgmath::{InnerSpace, Matrix4 as Mat4, Rad, Vector3 as Vec3};

/// 浮点比较的容差
pub const EPSILON: f32 = 1e-6;

/// 归一化向量；长度小于 EPSILON 时返回零向量而不是 NaN
pub fn normalize_or_zero(v: Vec3<f32>) -> Vec3<f32> {
    let len = v.magnitude();
    if len < EPSILON {
        return Vec3::new(0.0, 0.0, 0.0);
    }
    v / len
}

pub fn translate(t: Vec3<f32>) -> Mat4<f32> {
    Mat4::from_translation(t)
}

pub fn scale(s: Vec3<f32>) -> Mat4<f32> {
    Mat4::from_nonuniform_scale(s.x, s.y, s.z)
}

pub fn rotate_x(theta: f32) -> Mat4<f32> {
    Mat4::from_angle_x(Rad(theta))
}

pub fn rotate_y(theta: f32) -> Mat4<f32> {
    Mat4::from_angle_y(Rad(theta))
}

pub fn rotate_z(theta: f32) -> Mat4<f32> {
    Mat4::from_angle_z(Rad(theta))
}

/// 欧拉角旋转，顺序为 y → x → z（矩阵乘法写作 Rz · Rx · Ry）
pub fn rotate(angles: Vec3<f32>) -> Mat4<f32> {
    rotate_z(angles.z) * rotate_x(angles.x) * rotate_y(angles.y)
}

/// NDC 到像素坐标：x、y 缩放为视口一半，y 轴翻转，深度保持不变
#[rustfmt::skip]
pub fn viewport(width: f32, height: f32) -> Mat4<f32> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    // cgmath 按列传参
    Mat4::new(
        hw,   0.0,  0.0, 0.0,
        0.0, -hh,   0.0, 0.0,
        0.0,  0.0,  1.0, 0.0,
        hw,   hh,   0.0, 1.0,
    )
}
