//! 动画片段 - 关键帧轨道的内存模型
//!
//! 存储单个动画片段的关节树与逐帧采样，不含任何解算逻辑。
//! 片段由外部动画文件加载器填充。

use glam::{Quat, Vec3};

/// 旋转关键帧
///
/// 源动画格式在旋转关键帧上附带一个位置载荷：首帧的载荷编码
/// 骨骼相对父关节的偏移（肢体长度与方向），而不是放在独立的
/// 平移轨道里。该载荷只应通过 [`JointTrack::bind_offset`] 读取。
#[derive(Debug, Clone, Copy)]
pub struct RotationKey {
    /// 本帧相对静止姿态的局部旋转（单位四元数）
    pub rotation: Quat,
    /// 位置载荷（与旋转轨道同帧索引）
    pub offset: Vec3,
}

impl RotationKey {
    pub fn new(rotation: Quat, offset: Vec3) -> Self {
        Self { rotation, offset }
    }
}

/// 关节轨道
///
/// 片段内一个具名关节的全部采样数据。
#[derive(Debug, Clone)]
pub struct JointTrack {
    /// 关节名称（片段内唯一）
    pub name: String,
    /// 父关节名称（空字符串表示根关节）
    pub parent_name: String,
    /// 逐帧世界空间平移（仅根关节填充）
    pub position_keys: Vec<Vec3>,
    /// 逐帧旋转关键帧（每个关节至少一帧）
    pub rotation_keys: Vec<RotationKey>,
}

impl JointTrack {
    pub fn new(name: impl Into<String>, parent_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_name: parent_name.into(),
            position_keys: Vec::new(),
            rotation_keys: Vec::new(),
        }
    }

    /// 是否为根关节
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_name.is_empty()
    }

    /// 绑定偏移：首个旋转关键帧的位置载荷
    ///
    /// 源格式把骨骼偏移塞进旋转轨道的首帧载荷里。此约定集中在
    /// 这一个访问器，若日后确认为格式缺陷只需改这里。
    #[inline]
    pub fn bind_offset(&self) -> Option<Vec3> {
        self.rotation_keys.first().map(|k| k.offset)
    }
}

/// 动画片段
///
/// 关节轨道集合。不变量：除根外每个关节的父名称都能解析到
/// 片段内的另一个关节，整棵树从根可达且无环。
#[derive(Debug, Clone, Default)]
pub struct AnimationClip {
    /// 关节轨道列表（加载顺序）
    pub joints: Vec<JointTrack>,
}

impl AnimationClip {
    pub fn new() -> Self {
        Self { joints: Vec::new() }
    }

    /// 追加关节轨道
    pub fn push_joint(&mut self, joint: JointTrack) {
        self.joints.push(joint);
    }

    /// 按名称查找关节轨道
    pub fn find(&self, name: &str) -> Option<&JointTrack> {
        self.joints.iter().find(|j| j.name == name)
    }

    /// 根关节轨道
    pub fn root(&self) -> Option<&JointTrack> {
        self.joints.iter().find(|j| j.is_root())
    }

    /// 关节数量
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}
