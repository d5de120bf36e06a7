//! 骨骼编译
//!
//! 按父先子序遍历解算后的绑定姿态，为每个非根关节发射一个沿
//! 骨骼轴取向的刚体；父关节非根的边再发射一组三轴铰链约束。
//! 根关节本身不实例化刚体，根的直接子节点不加约束（自由基座）。
//!
//! 刚体与约束只追加到外部集合，不改动、不重排既有条目。

use std::collections::HashMap;

use glam::Vec3;

use crate::animation::{extract_joint_angles, AnimationClip, JointAngleTracks};
use crate::physics::{ConstraintSink, RigidBodySink, ShapeTemplate};
use crate::skeleton::BindPose;
use crate::Result;

/// 编译选项
///
/// 显式传入每次编译，不走全局配置。
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// 线性单位换算系数，作用于所有发射的位置、锚点与尺寸
    /// （动画原生单位 -> 模拟单位），默认 0.01
    pub scale: f32,
    /// 每个刚体的质量，默认 1.0
    pub body_mass: f32,
    /// 刚体实例化用的几何模板，默认单位盒
    pub template: ShapeTemplate,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            scale: 0.01,
            body_mass: 1.0,
            template: ShapeTemplate::UnitBox,
        }
    }
}

/// 单个非根关节的编译记录
#[derive(Debug, Clone)]
pub struct CompiledJoint {
    /// 关节名称
    pub name: String,
    /// 刚体在外部集合中的索引
    pub body: usize,
    /// 三轴铰链约束索引（X, Y, Z 轴序；父为根时无约束）
    pub hinges: Option<[usize; 3]>,
}

/// 编译后的骨骼
///
/// 索引映射只对本次编译写入的外部集合有效；集合被旁路改动后
/// 即失效。
#[derive(Debug, Clone)]
pub struct CompiledSkeleton {
    /// 非根关节的编译记录（发射顺序 = 遍历顺序）
    pub joints: Vec<CompiledJoint>,
    /// 关节名称 -> 记录索引
    pub index_by_name: HashMap<String, usize>,
    /// 解算出的绑定姿态（含跳过关节的故障记录）
    pub bind_pose: BindPose,
    /// 关节欧拉角轨道（回放驱动目标）
    pub angle_tracks: JointAngleTracks,
}

impl CompiledSkeleton {
    /// 名称 -> 刚体索引
    pub fn body_index(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).map(|&i| self.joints[i].body)
    }

    /// 名称 -> 三轴铰链约束索引
    pub fn hinge_indices(&self, name: &str) -> Option<[usize; 3]> {
        self.index_by_name
            .get(name)
            .and_then(|&i| self.joints[i].hinges)
    }
}

/// 铰链约束的世界对齐轴（X, Y, Z 轴序）
const HINGE_AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

/// 编译骨骼
///
/// 解算绑定姿态后按遍历顺序发射刚体与约束，并提取欧拉角轨道。
/// 对相同的片段与选项，两次编译到独立空集合的结果逐位一致。
pub fn compile_skeleton<B, C>(
    clip: &AnimationClip,
    bodies: &mut B,
    constraints: &mut C,
    options: &CompileOptions,
) -> Result<CompiledSkeleton>
where
    B: RigidBodySink,
    C: ConstraintSink,
{
    let pose = BindPose::resolve(clip)?;
    let scale = options.scale;

    let mut joints = Vec::with_capacity(pose.joints.len().saturating_sub(1));
    let mut index_by_name = HashMap::with_capacity(joints.capacity());
    // 解算序列索引 -> 已发射刚体索引（根无刚体）
    let mut body_of = vec![None; pose.joints.len()];

    for (i, joint) in pose.joints.iter().enumerate() {
        let Some(parent) = joint.parent else {
            continue;
        };
        let parent_joint = &pose.joints[parent];

        // 刚体位于骨骼段中点，沿参考轴缩放，按最短弧旋转取向
        let position = (joint.position + parent_joint.position) / 2.0 * scale;
        let body = bodies.append_body(
            options.body_mass,
            position,
            joint.orientation,
            options.template,
            joint.rest_axis * scale,
        );
        body_of[i] = Some(body);

        // 父为根：自由基座，不发射约束
        let hinges = if parent_joint.is_root() {
            None
        } else {
            // 父关节已在更早的遍历中发射过刚体
            let parent_body = body_of[parent].expect("parent body emitted before child");
            let anchor = parent_joint.position * scale;
            let mut indices = [0usize; 3];
            for (slot, axis) in indices.iter_mut().zip(HINGE_AXES) {
                *slot = constraints.append_hinge(parent_body, body, anchor, axis);
            }
            Some(indices)
        };

        index_by_name.insert(joint.name.clone(), joints.len());
        joints.push(CompiledJoint {
            name: joint.name.clone(),
            body,
            hinges,
        });
    }

    let constraint_count: usize = joints.iter().filter(|j| j.hinges.is_some()).count() * 3;
    log::info!(
        "[骨骼编译] 完成: {} 刚体, {} 铰链约束, 缩放 {}",
        joints.len(),
        constraint_count,
        scale
    );

    let angle_tracks = extract_joint_angles(clip);

    Ok(CompiledSkeleton {
        joints,
        index_by_name,
        bind_pose: pose,
        angle_tracks,
    })
}
