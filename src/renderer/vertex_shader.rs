use cgmath::{InnerSpace, Matrix4 as Mat4, Vector3 as Vec3, Vector4 as Vec4};
use rayon::prelude::*;

use crate::model::{Face, Mesh};
use crate::transform::normalize_or_zero;

/// 一帧内某个网格全部顶点的变换结果，与网格顶点缓冲按下标一一对应
pub struct MeshFrame {
    pub world: Vec<Vec4<f32>>,
    pub clip: Vec<Vec4<f32>>,
}

impl MeshFrame {
    pub fn face_world(&self, face: &Face) -> [Vec3<f32>; 3] {
        face.indices.map(|i| self.world[i].truncate())
    }

    pub fn face_clip(&self, face: &Face) -> [Vec4<f32>; 3] {
        face.indices.map(|i| self.clip[i])
    }
}

/// 模型空间 → 世界空间 → 裁剪空间，整批顶点一起变换
pub fn transform_mesh(mesh: &Mesh, camera_matrix: &Mat4<f32>) -> MeshFrame {
    let world_matrix = mesh.world_matrix();
    let camera_matrix = *camera_matrix;
    let world: Vec<Vec4<f32>> = mesh
        .vertices
        .par_iter()
        .map(|v| world_matrix * *v)
        .collect();
    let clip = world.par_iter().map(|v| camera_matrix * *v).collect();
    MeshFrame { world, clip }
}

/// 世界空间面法线，边的顺序固定为 (v2 - v0) × (v1 - v0)
pub fn face_normal(world: &[Vec3<f32>; 3]) -> Vec3<f32> {
    normalize_or_zero((world[2] - world[0]).cross(world[1] - world[0]))
}

/// 法线背离或垂直于相机视线时为背面
pub fn is_backface(normal: Vec3<f32>, first_vertex: Vec3<f32>, camera_pos: Vec3<f32>) -> bool {
    let camera_to_face = normalize_or_zero(first_vertex - camera_pos);
    normal.dot(camera_to_face) >= 0.0
}

pub fn centroid(world: &[Vec3<f32>; 3]) -> Vec3<f32> {
    (world[0] + world[1] + world[2]) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Face, Mesh};
    use cgmath::SquareMatrix;

    #[test]
    fn normal_edge_order() {
        let world = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        // (v2 - v0) × (v1 - v0) = y × x = -z
        assert_eq!(face_normal(&world), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn normal_towards_camera_is_kept() {
        let camera = Vec3::new(0.0, 0.0, 0.0);
        let v0 = Vec3::new(0.3, -0.2, 5.0);
        assert!(!is_backface(Vec3::new(0.0, 0.0, -1.0), v0, camera));
        assert!(is_backface(Vec3::new(0.0, 0.0, 1.0), v0, camera));
    }

    #[test]
    fn tangent_face_is_culled() {
        let camera = Vec3::new(0.0, 0.0, 0.0);
        assert!(is_backface(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
            camera
        ));
        // 零面积三角形的零法线同样被剔除
        assert!(is_backface(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
            camera
        ));
    }

    #[test]
    fn batched_transform_applies_world_then_camera() {
        let mut mesh = Mesh::new(
            vec![Vec4::new(1.0, 0.0, 0.0, 1.0), Vec4::new(0.0, 2.0, 0.0, 1.0)],
            vec![],
        );
        mesh.position = Vec3::new(0.0, 0.0, 5.0);
        let camera_matrix = Mat4::from_scale(2.0);
        let frame = transform_mesh(&mesh, &camera_matrix);
        assert_eq!(frame.world[0], Vec4::new(1.0, 0.0, 5.0, 1.0));
        assert_eq!(frame.clip[1], Vec4::new(0.0, 4.0, 10.0, 1.0));

        let identity = transform_mesh(&mesh, &Mat4::identity());
        assert_eq!(identity.clip, identity.world);
    }

    #[test]
    fn face_slices_follow_indices() {
        let mesh = Mesh::new(
            vec![
                Vec4::new(0.0, 0.0, 0.0, 1.0),
                Vec4::new(1.0, 0.0, 0.0, 1.0),
                Vec4::new(0.0, 1.0, 0.0, 1.0),
            ],
            vec![Face::new([2, 0, 1])],
        );
        let frame = transform_mesh(&mesh, &Mat4::identity());
        let world = frame.face_world(&mesh.faces[0]);
        assert_eq!(world[0], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(centroid(&world), Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0));
    }
}
