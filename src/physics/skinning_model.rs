//! 蒙皮模型
//!
//! 聚合粒子缓冲、距离约束活动集与刚度系数。外部求解器控制步进
//! 与迭代次数，本模型只提供"每约束调用一次"的单轮投影。

use glam::Vec3;

use super::{DistanceConstraint, ParticleSet};
use crate::Result;

/// 蒙皮模型
#[derive(Debug, Clone)]
pub struct SkinningModel {
    particles: ParticleSet,
    constraints: Vec<DistanceConstraint>,
    /// 距离修正混合系数 ∈ [0, 1]
    stiffness: f32,
}

impl Default for SkinningModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SkinningModel {
    pub fn new() -> Self {
        Self {
            particles: ParticleSet::new(),
            constraints: Vec::new(),
            stiffness: 0.5,
        }
    }

    /// 粒子缓冲（只读）
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// 粒子缓冲（可写，供外部积分器推进位置）
    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        &mut self.particles
    }

    /// 距离修正刚度
    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn set_stiffness(&mut self, stiffness: f32) {
        self.stiffness = stiffness.clamp(0.0, 1.0);
    }

    /// 批量追加蒙皮顶点粒子
    pub fn add_vertices(&mut self, points: &[Vec3]) {
        self.particles.add_vertices(points);
    }

    /// 在两粒子间建立距离约束并加入活动集
    ///
    /// 索引相同的契约违例直接上抛，约束不进入活动集。
    pub fn add_distance_constraint(&mut self, a: usize, b: usize) -> Result<usize> {
        let constraint = DistanceConstraint::init(&self.particles, a, b)?;
        self.constraints.push(constraint);
        Ok(self.constraints.len() - 1)
    }

    /// 活动约束数量
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// 单轮投影：每个活动约束依序修正一次
    ///
    /// 由外部求解器每迭代调用一次；同一粒子被多个约束共享时的
    /// 评估顺序即活动集顺序。
    pub fn solve_iteration(&mut self) {
        for constraint in &self.constraints {
            constraint.solve(&mut self.particles, self.stiffness);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ParticleBuffer;

    #[test]
    fn test_rejected_constraint_not_in_active_set() {
        let mut model = SkinningModel::new();
        model.add_vertices(&[Vec3::ZERO, Vec3::X]);

        assert!(model.add_distance_constraint(0, 0).is_err());
        assert_eq!(model.constraint_count(), 0);

        assert_eq!(model.add_distance_constraint(0, 1).unwrap(), 0);
        assert_eq!(model.constraint_count(), 1);
    }

    #[test]
    fn test_iterations_converge_to_rest_lengths() {
        let mut model = SkinningModel::new();
        model.add_vertices(&[
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]);
        model.add_distance_constraint(0, 1).unwrap();
        model.add_distance_constraint(1, 2).unwrap();
        model.set_stiffness(1.0);

        // 扰动中间粒子后反复迭代
        model.particles_mut().set_position(1, Vec3::new(1.4, 0.3, 0.0));
        for _ in 0..64 {
            model.solve_iteration();
        }

        let p = |i| model.particles().position(i);
        assert!(((p(0) - p(1)).length() - 1.0).abs() < 1.0e-3);
        assert!(((p(1) - p(2)).length() - 1.0).abs() < 1.0e-3);
    }
}
