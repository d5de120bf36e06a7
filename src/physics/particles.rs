//! 粒子缓冲
//!
//! 蒙皮粒子的位置与逆质量存储，对应源工程 PBD 库的 ParticleData。
//! 逆质量 0 表示固定粒子（不被约束修正移动）。

use glam::Vec3;

use super::ParticleBuffer;

/// 粒子集合
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    positions: Vec<Vec3>,
    inv_masses: Vec<f32>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个粒子，返回其索引
    pub fn add_particle(&mut self, position: Vec3, inv_mass: f32) -> usize {
        self.positions.push(position);
        self.inv_masses.push(inv_mass);
        self.positions.len() - 1
    }

    /// 批量追加单位逆质量的顶点粒子
    pub fn add_vertices(&mut self, points: &[Vec3]) {
        for &p in points {
            self.add_particle(p, 1.0);
        }
    }

    /// 固定一个粒子（逆质量清零）
    pub fn pin(&mut self, index: usize) {
        self.inv_masses[index] = 0.0;
    }
}

impl ParticleBuffer for ParticleSet {
    fn len(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    fn set_position(&mut self, index: usize, position: Vec3) {
        self.positions[index] = position;
    }

    fn inv_mass(&self, index: usize) -> f32 {
        self.inv_masses[index]
    }
}
