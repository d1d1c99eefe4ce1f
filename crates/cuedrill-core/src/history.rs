//! 撤销/重做历史
//!
//! 保存场景的完整快照。新记录会截断重做分支，超出容量时丢弃最旧的快照。

use crate::config::HistoryConfig;
use crate::scene::Scene;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct SceneHistory {
    snapshots: VecDeque<Scene>,
    /// 当前快照下标
    cursor: usize,
    capacity: usize,
}

impl SceneHistory {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            snapshots: VecDeque::new(),
            cursor: 0,
            capacity: config.capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// 记录当前状态
    pub fn record(&mut self, scene: &Scene) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push_back(scene.clone());
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// 返回需要恢复的上一个快照
    pub fn undo(&mut self) -> Option<&Scene> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        tracing::debug!("Undo to snapshot {}/{}", self.cursor + 1, self.snapshots.len());
        self.snapshots.get(self.cursor)
    }

    pub fn redo(&mut self) -> Option<&Scene> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        tracing::debug!("Redo to snapshot {}/{}", self.cursor + 1, self.snapshots.len());
        self.snapshots.get(self.cursor)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
    }
}

impl Default for SceneHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}
