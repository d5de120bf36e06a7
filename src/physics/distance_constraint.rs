//! 距离投影约束
//!
//! 两粒子位置约束：保持初始化时捕获的静止长度。由外部求解器的
//! 迭代回调反复调用 [`DistanceConstraint::solve`]，单次调用只做
//! 一次按逆质量加权的对称部分修正；迭代次数与调用顺序由外部
//! 求解器控制。


use super::ParticleBuffer;
use crate::{Result, SkinError};

/// 间距低于此值视为重合，本轮修正跳过
const ZERO_SEPARATION: f32 = 1.0e-9;

/// 距离投影约束
///
/// 初始化后静止长度与粒子索引不再变化；solve 之间不携带任何
/// 内部状态，调用零次或多次都安全。
#[derive(Debug, Clone, Copy)]
pub struct DistanceConstraint {
    particles: [usize; 2],
    rest_length: f32,
}

impl DistanceConstraint {
    /// 初始化：记录两粒子索引，并把当前欧氏距离捕获为静止长度
    ///
    /// 两索引相同是调用方契约违例，返回错误且约束不应进入活动集。
    pub fn init(particles: &impl ParticleBuffer, a: usize, b: usize) -> Result<Self> {
        if a == b {
            return Err(SkinError::ConstraintInit(a));
        }
        let rest_length = (particles.position(a) - particles.position(b)).length();
        Ok(Self {
            particles: [a, b],
            rest_length,
        })
    }

    /// 两端粒子索引
    pub fn particle_indices(&self) -> [usize; 2] {
        self.particles
    }

    /// 静止长度
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    /// 单次投影修正
    ///
    /// stiffness ∈ [0, 1]：0 不修正，1 单次完全修正。两粒子重合时
    /// 方向不可定义，本轮跳过，不报错。
    pub fn solve(&self, particles: &mut impl ParticleBuffer, stiffness: f32) {
        let [a, b] = self.particles;
        let x1 = particles.position(a);
        let x2 = particles.position(b);

        let diff = x1 - x2;
        let distance = diff.length();
        if distance < ZERO_SEPARATION {
            log::debug!("[距离约束] 粒子 {} 与 {} 重合，跳过本轮修正", a, b);
            return;
        }

        let direction = diff / distance;
        let error = distance - self.rest_length;
        let correction = direction * (0.5 * stiffness * error);

        particles.set_position(a, x1 - correction * particles.inv_mass(a));
        particles.set_position(b, x2 + correction * particles.inv_mass(b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{ParticleBuffer, ParticleSet};
    use glam::Vec3;

    const EPSILON: f32 = 1.0e-5;

    fn two_particles() -> ParticleSet {
        let mut particles = ParticleSet::new();
        particles.add_particle(Vec3::ZERO, 1.0);
        particles.add_particle(Vec3::X, 1.0);
        particles
    }

    #[test]
    fn test_init_captures_rest_length() {
        let particles = two_particles();
        let constraint = DistanceConstraint::init(&particles, 0, 1).unwrap();
        assert!((constraint.rest_length() - 1.0).abs() < EPSILON);
        assert_eq!(constraint.particle_indices(), [0, 1]);
    }

    #[test]
    fn test_init_rejects_equal_indices() {
        let particles = two_particles();
        let result = DistanceConstraint::init(&particles, 1, 1);
        assert!(matches!(result, Err(SkinError::ConstraintInit(1))));
    }

    #[test]
    fn test_solve_restores_rest_length_symmetrically() {
        let mut particles = two_particles();
        let constraint = DistanceConstraint::init(&particles, 0, 1).unwrap();

        // 把第二个粒子拉到距离 2
        particles.set_position(1, Vec3::new(2.0, 0.0, 0.0));
        constraint.solve(&mut particles, 1.0);

        let x1 = particles.position(0);
        let x2 = particles.position(1);
        // 等逆质量下位移 1:1 对称，一轮即恢复静止长度
        assert!((x1 - Vec3::new(0.5, 0.0, 0.0)).length() < EPSILON);
        assert!((x2 - Vec3::new(1.5, 0.0, 0.0)).length() < EPSILON);
        assert!(((x1 - x2).length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_pinned_particle_stays_fixed() {
        let mut particles = two_particles();
        particles.pin(1);
        let constraint = DistanceConstraint::init(&particles, 0, 1).unwrap();

        particles.set_position(0, Vec3::new(-1.0, 0.0, 0.0));
        for _ in 0..16 {
            constraint.solve(&mut particles, 1.0);
        }

        assert_eq!(particles.position(1), Vec3::X);
        // 误差只由可动端吸收，多轮后收敛到静止长度
        assert!(((particles.position(0) - Vec3::X).length() - 1.0).abs() < 1.0e-3);
    }

    #[test]
    fn test_zero_separation_skipped() {
        let mut particles = ParticleSet::new();
        particles.add_particle(Vec3::ONE, 1.0);
        particles.add_particle(Vec3::X, 1.0);
        let constraint = DistanceConstraint::init(&particles, 0, 1).unwrap();

        particles.set_position(1, Vec3::ONE);
        constraint.solve(&mut particles, 1.0);

        // 跳过修正，位置保持且不产生 NaN
        assert_eq!(particles.position(0), Vec3::ONE);
        assert_eq!(particles.position(1), Vec3::ONE);
    }

    #[test]
    fn test_zero_stiffness_is_noop() {
        let mut particles = two_particles();
        let constraint = DistanceConstraint::init(&particles, 0, 1).unwrap();

        particles.set_position(1, Vec3::new(3.0, 0.0, 0.0));
        constraint.solve(&mut particles, 0.0);

        assert_eq!(particles.position(0), Vec3::ZERO);
        assert_eq!(particles.position(1), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_partial_stiffness_moves_toward_rest() {
        let mut particles = two_particles();
        let constraint = DistanceConstraint::init(&particles, 0, 1).unwrap();

        particles.set_position(1, Vec3::new(2.0, 0.0, 0.0));
        let before = 2.0_f32;
        constraint.solve(&mut particles, 0.5);
        let after = (particles.position(0) - particles.position(1)).length();

        assert!(after < before);
        assert!(after > 1.0);
    }
}
