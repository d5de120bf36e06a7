//! 绑定姿态解算
//!
//! 从片段首帧样本推导每个关节相对父关节的静止偏移，并自顶向下
//! 累加出绝对静止位置。参考轴 (1, |offset|, 1) 与最短弧旋转的
//! 约定复刻源动画管线，不做物理意义上的重新解释。

use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::animation::AnimationClip;
use crate::{Result, SkinError};

/// 偏移长度低于此值视为退化（父子关节重合）
const DEGENERATE_EPSILON: f32 = 1.0e-6;

/// 退化时替代参考轴的最小 Y 分量
pub const MIN_AXIS_LENGTH: f32 = 1.0e-4;

/// 解算后的单个关节
#[derive(Debug, Clone)]
pub struct ResolvedJoint {
    /// 关节名称
    pub name: String,
    /// 父关节在解算序列中的索引（根为 None）
    pub parent: Option<usize>,
    /// 绝对静止位置
    pub position: Vec3,
    /// 相对父关节的静止偏移
    pub offset: Vec3,
    /// 参考轴 (1, |offset|, 1)
    pub rest_axis: Vec3,
    /// 把参考轴映射到偏移方向的最短弧旋转
    pub orientation: Quat,
    /// 偏移长度为零时置位（方向推导退化，已回退为单位旋转）
    pub degenerate: bool,
}

impl ResolvedJoint {
    /// 是否为根关节
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// 绑定姿态
///
/// 解算顺序保证父先于子。名称到索引的映射在解算时构建一次，
/// 之后所有查询走整数索引。
#[derive(Debug, Clone)]
pub struct BindPose {
    /// 解算后的关节序列（索引 0 为根）
    pub joints: Vec<ResolvedJoint>,
    /// 名称 -> 序列索引
    pub index_by_name: HashMap<String, usize>,
    /// 被跳过关节的故障记录（拓扑断裂、缺少旋转关键帧）
    pub faults: Vec<SkinError>,
}

impl BindPose {
    /// 从片段首帧解算绑定姿态
    ///
    /// 自根广度优先遍历，保证父关节先于子关节解算。父名称无法
    /// 解析的关节连同其子树一起跳过并记录故障，不影响其余分支。
    pub fn resolve(clip: &AnimationClip) -> Result<Self> {
        if clip.is_empty() {
            return Err(SkinError::Clip("animation clip has no joints".into()));
        }
        let root = clip
            .root()
            .ok_or_else(|| SkinError::Clip("animation clip has no root joint".into()))?;

        // 名称 -> 片段索引，及子关节邻接表
        let mut clip_index = HashMap::with_capacity(clip.len());
        for (i, joint) in clip.joints.iter().enumerate() {
            clip_index.insert(joint.name.as_str(), i);
        }
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); clip.len()];
        for (i, joint) in clip.joints.iter().enumerate() {
            if joint.is_root() {
                continue;
            }
            if let Some(&p) = clip_index.get(joint.parent_name.as_str()) {
                children[p].push(i);
            }
        }

        let mut joints = Vec::with_capacity(clip.len());
        let mut index_by_name = HashMap::with_capacity(clip.len());
        let mut faults = Vec::new();

        // 根关节：绑定位置取首个位置关键帧
        let root_position = root.position_keys.first().copied().unwrap_or_else(|| {
            log::warn!("[绑定姿态] 根关节 '{}' 没有位置关键帧，回退为原点", root.name);
            Vec3::ZERO
        });
        let root_clip_idx = clip_index[root.name.as_str()];
        index_by_name.insert(root.name.clone(), 0);
        joints.push(ResolvedJoint {
            name: root.name.clone(),
            parent: None,
            position: root_position,
            offset: Vec3::ZERO,
            rest_axis: Vec3::new(1.0, 0.0, 1.0),
            orientation: Quat::IDENTITY,
            degenerate: false,
        });

        // 广度优先：只从已解算的关节向下扩展
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(root_clip_idx);
        while let Some(clip_idx) = queue.pop_front() {
            let parent_resolved = index_by_name[&clip.joints[clip_idx].name];
            for &child_idx in &children[clip_idx] {
                let track = &clip.joints[child_idx];
                let Some(offset) = track.bind_offset() else {
                    log::warn!("[绑定姿态] 关节 '{}' 没有旋转关键帧，跳过其子树", track.name);
                    faults.push(SkinError::Clip(format!(
                        "joint '{}' has no rotation keys",
                        track.name
                    )));
                    continue;
                };

                let length = offset.length();
                let (rest_axis, orientation, degenerate) = if length < DEGENERATE_EPSILON {
                    // 父子重合：方向不可推导，回退为单位旋转与最小延伸
                    log::warn!(
                        "[绑定姿态] 关节 '{}' 绑定偏移长度为零，使用单位旋转",
                        track.name
                    );
                    (Vec3::new(1.0, MIN_AXIS_LENGTH, 1.0), Quat::IDENTITY, true)
                } else {
                    let rest_axis = Vec3::new(1.0, length, 1.0);
                    let orientation =
                        Quat::from_rotation_arc(rest_axis.normalize(), offset / length);
                    (rest_axis, orientation, false)
                };

                let position = joints[parent_resolved].position + offset;
                index_by_name.insert(track.name.clone(), joints.len());
                joints.push(ResolvedJoint {
                    name: track.name.clone(),
                    parent: Some(parent_resolved),
                    position,
                    offset,
                    rest_axis,
                    orientation,
                    degenerate,
                });
                queue.push_back(child_idx);
            }
        }

        // 未解算的非根关节：父名称不存在，或祖先已被跳过
        for track in &clip.joints {
            if track.is_root() || index_by_name.contains_key(&track.name) {
                continue;
            }
            if faults.iter().any(|f| {
                matches!(f, SkinError::Clip(msg) if msg.contains(&format!("'{}'", track.name)))
            }) {
                continue;
            }
            log::warn!(
                "[绑定姿态] 关节 '{}' 的父 '{}' 无法解析，跳过",
                track.name,
                track.parent_name
            );
            faults.push(SkinError::Topology {
                joint: track.name.clone(),
                parent: track.parent_name.clone(),
            });
        }

        log::info!(
            "[绑定姿态] 解算完成: {} 关节, {} 跳过",
            joints.len(),
            faults.len()
        );

        Ok(Self {
            joints,
            index_by_name,
            faults,
        })
    }

    /// 根关节
    #[inline]
    pub fn root(&self) -> &ResolvedJoint {
        &self.joints[0]
    }

    /// 名称 -> 序列索引
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    /// 名称 -> 绝对静止位置
    pub fn position_of(&self, name: &str) -> Option<Vec3> {
        self.index_of(name).map(|i| self.joints[i].position)
    }
}
