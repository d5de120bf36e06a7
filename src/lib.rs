//! Skinning Engine - 基于位置动力学的骨骼蒙皮运行时
//!
//! 提供与 PositionBasedSkinning (C++) 等价的核心功能：
//! - 关键帧动画轨道的内存模型
//! - 绑定姿态解算（从首帧样本推导骨骼偏移）
//! - 骨骼编译（每段骨骼一个刚体 + 三轴铰链约束组）
//! - 关节欧拉角轨道提取（XYZ 内旋序）
//! - 距离投影约束（蒙皮粒子与参考拓扑的距离保持）
//!
//! 外部求解器（迭代投影、碰撞、积分）不在本 crate 内，
//! 通过 [`physics`] 模块的 Sink/Buffer 接口对接。

pub mod animation;
pub mod physics;
pub mod skeleton;

pub use animation::{extract_joint_angles, AnimationClip, JointAngleTracks, JointTrack, RotationKey};
pub use physics::{
    BodyInit, ConstraintSet, ConstraintSink, DistanceConstraint, HingeInit, ParticleBuffer,
    ParticleSet, RigidBodySet, RigidBodySink, ShapeTemplate, SkinningModel,
};
pub use skeleton::{compile_skeleton, BindPose, CompileOptions, CompiledSkeleton};

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SkinError {
    #[error("Topology error: joint '{joint}' references unknown parent '{parent}'")]
    Topology { joint: String, parent: String },

    #[error("Clip error: {0}")]
    Clip(String),

    #[error("Constraint init error: particle index {0} used for both endpoints")]
    ConstraintInit(usize),
}

pub type Result<T> = std::result::Result<T, SkinError>;
