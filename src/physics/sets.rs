//! 刚体/约束暂存集合
//!
//! 编译产物先以初始化参数的形式存进 Vec，再由上层一次性提交给
//! 外部引擎，避免半构建状态对求解器可见。两个集合都实现对应的
//! Sink 接口，也可在测试中直接当作记录器使用。

use glam::{Quat, Vec3};

use super::{ConstraintSink, RigidBodySink, ShapeTemplate};

/// 刚体初始化参数
#[derive(Debug, Clone, Copy)]
pub struct BodyInit {
    /// 质量
    pub mass: f32,
    /// 初始位置
    pub position: Vec3,
    /// 初始取向
    pub orientation: Quat,
    /// 几何模板
    pub template: ShapeTemplate,
    /// 沿模板各轴的尺寸
    pub extent: Vec3,
}

/// 单轴铰链约束初始化参数
#[derive(Debug, Clone, Copy)]
pub struct HingeInit {
    /// 父刚体索引
    pub body_a: usize,
    /// 子刚体索引
    pub body_b: usize,
    /// 世界空间锚点
    pub anchor: Vec3,
    /// 铰链轴（世界对齐）
    pub axis: Vec3,
}

/// 刚体集合
#[derive(Debug, Clone, Default)]
pub struct RigidBodySet {
    bodies: Vec<BodyInit>,
}

impl RigidBodySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BodyInit> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyInit> {
        self.bodies.iter()
    }
}

impl RigidBodySink for RigidBodySet {
    fn append_body(
        &mut self,
        mass: f32,
        position: Vec3,
        orientation: Quat,
        template: ShapeTemplate,
        extent: Vec3,
    ) -> usize {
        self.bodies.push(BodyInit {
            mass,
            position,
            orientation,
            template,
            extent,
        });
        self.bodies.len() - 1
    }
}

/// 约束集合
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    hinges: Vec<HingeInit>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hinges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hinges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HingeInit> {
        self.hinges.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HingeInit> {
        self.hinges.iter()
    }
}

impl ConstraintSink for ConstraintSet {
    fn append_hinge(&mut self, body_a: usize, body_b: usize, anchor: Vec3, axis: Vec3) -> usize {
        self.hinges.push(HingeInit {
            body_a,
            body_b,
            anchor,
            axis,
        });
        self.hinges.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_returns_sequential_indices() {
        let mut bodies = RigidBodySet::new();
        let i0 = bodies.append_body(
            1.0,
            Vec3::ZERO,
            Quat::IDENTITY,
            ShapeTemplate::UnitBox,
            Vec3::ONE,
        );
        let i1 = bodies.append_body(
            2.0,
            Vec3::X,
            Quat::IDENTITY,
            ShapeTemplate::UnitBox,
            Vec3::ONE,
        );

        assert_eq!((i0, i1), (0, 1));
        assert_eq!(bodies.get(1).unwrap().mass, 2.0);

        let mut constraints = ConstraintSet::new();
        let c0 = constraints.append_hinge(0, 1, Vec3::ZERO, Vec3::X);
        assert_eq!(c0, 0);
        assert_eq!(constraints.get(0).unwrap().body_b, 1);
    }
}
