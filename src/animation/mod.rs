//! 动画模块
//!
//! 关键帧动画片段的内存模型与关节欧拉角轨道提取。
//! 动画文件的解码（BVH/FBX 等）由外部加载器完成，本模块只
//! 接收解码后的关节树与逐帧采样。

mod clip;
mod joint_angles;

pub use clip::{AnimationClip, JointTrack, RotationKey};
pub use joint_angles::{extract_joint_angles, quat_to_euler_xyz, JointAngleTracks};
