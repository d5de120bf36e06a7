//! 物理对接模块
//!
//! 外部约束求解引擎的对接面：刚体/约束集合的追加接口、粒子
//! 缓冲接口、距离投影约束与蒙皮模型聚合。时间积分、碰撞检测
//! 与迭代调度都在外部引擎里，本模块不做。

mod distance_constraint;
mod particles;
mod sets;
mod skinning_model;

pub use distance_constraint::DistanceConstraint;
pub use particles::ParticleSet;
pub use sets::{BodyInit, ConstraintSet, HingeInit, RigidBodySet};
pub use skinning_model::SkinningModel;

use glam::{Quat, Vec3};

/// 刚体几何模板
///
/// 外部引擎用它实例化刚体的碰撞/渲染网格，再按 extent 缩放。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeTemplate {
    /// 单位盒网格
    #[default]
    UnitBox,
}

/// 刚体集合的追加接口
///
/// 编译器只追加，从不改动或重排既有条目。
pub trait RigidBodySink {
    /// 追加一个刚体，返回其在集合中的索引
    fn append_body(
        &mut self,
        mass: f32,
        position: Vec3,
        orientation: Quat,
        template: ShapeTemplate,
        extent: Vec3,
    ) -> usize;
}

/// 约束集合的追加接口
pub trait ConstraintSink {
    /// 追加一个单轴铰链约束，返回其在集合中的索引
    fn append_hinge(&mut self, body_a: usize, body_b: usize, anchor: Vec3, axis: Vec3) -> usize;
}

/// 粒子位置/逆质量缓冲
///
/// 位置可写，逆质量只读；逆质量 0 表示固定粒子。
pub trait ParticleBuffer {
    /// 粒子数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 当前粒子位置
    fn position(&self, index: usize) -> Vec3;

    /// 写入粒子位置
    fn set_position(&mut self, index: usize, position: Vec3);

    /// 逆质量
    fn inv_mass(&self, index: usize) -> f32;
}
