//! 关节欧拉角轨道提取
//!
//! 把每个关节的逐帧旋转四元数转换为 XYZ 内旋序欧拉角序列，
//! 供回放阶段作为约束驱动目标使用。逐帧一一对应，不做重采样
//! 或插值。

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use glam::{Mat3, Quat, Vec3};

use super::AnimationClip;

/// 关节欧拉角轨道集合
///
/// 关节名称 -> 欧拉角序列（每个旋转关键帧一个 Vec3，弧度）。
/// 派生数据，源片段变化后需整体重新提取。
#[derive(Debug, Clone, Default)]
pub struct JointAngleTracks {
    /// 轨道映射
    pub tracks: HashMap<String, Vec<Vec3>>,
}

impl JointAngleTracks {
    /// 按关节名称取轨道
    pub fn get(&self, name: &str) -> Option<&[Vec3]> {
        self.tracks.get(name).map(Vec::as_slice)
    }

    /// 轨道数量
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// 提取片段中所有关节的欧拉角轨道
///
/// 保持原始关键帧顺序与数量（每个旋转关键帧恰好一个欧拉向量）。
pub fn extract_joint_angles(clip: &AnimationClip) -> JointAngleTracks {
    let mut tracks = HashMap::with_capacity(clip.len());

    for joint in &clip.joints {
        let angles: Vec<Vec3> = joint
            .rotation_keys
            .iter()
            .map(|key| quat_to_euler_xyz(key.rotation))
            .collect();
        tracks.insert(joint.name.clone(), angles);
    }

    JointAngleTracks { tracks }
}

/// 四元数 -> XYZ 内旋序欧拉角
///
/// 经旋转矩阵分解：R = Rx * Ry * Rz。
pub fn quat_to_euler_xyz(rotation: Quat) -> Vec3 {
    let m = Mat3::from_quat(rotation.normalize());
    let sy = m.col(2).x.clamp(-1.0, 1.0);

    // 万向节锁：cos(y) ≈ 0 时 X/Z 不再独立，固定 Z = 0
    if (1.0 - sy.abs()) < 1.0e-6 {
        Vec3::new(
            m.col(1).z.atan2(m.col(1).y),
            FRAC_PI_2.copysign(sy),
            0.0,
        )
    } else {
        Vec3::new(
            (-m.col(2).y).atan2(m.col(2).z),
            sy.asin(),
            (-m.col(1).x).atan2(m.col(0).x),
        )
    }
}
