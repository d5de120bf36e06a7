//! 骨骼模块
//!
//! 绑定姿态解算与骨骼编译：把关键帧关节树变成可模拟的刚体链。
//! 编译结果通过 [`crate::physics`] 的 Sink 接口写入外部求解器的
//! 刚体/约束集合。

mod bind_pose;
mod compiler;

pub use bind_pose::{BindPose, ResolvedJoint, MIN_AXIS_LENGTH};
pub use compiler::{compile_skeleton, CompileOptions, CompiledJoint, CompiledSkeleton};
