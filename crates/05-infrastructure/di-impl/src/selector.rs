//! 候选属性选择器

use dashmap::DashMap;
use di_abstractions::{InjectionMode, Injectable, PropertyDescriptor};
use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::debug;

/// 按注入模式筛选候选属性，保持声明顺序
///
/// 非接口类型或没有公开设置器的属性在任何模式下都不是候选
pub fn select_candidates<T>(
    properties: &[PropertyDescriptor<T>],
    mode: InjectionMode,
) -> Vec<PropertyDescriptor<T>> {
    let injectable = |property: &&PropertyDescriptor<T>| {
        property.is_interface() && property.has_public_setter()
    };

    match mode {
        InjectionMode::Disabled => Vec::new(),
        InjectionMode::MarkedOnly => properties
            .iter()
            .filter(injectable)
            .filter(|property| property.has_injection_marker())
            .cloned()
            .collect(),
        InjectionMode::AllInterfaceProperties => {
            properties.iter().filter(injectable).cloned().collect()
        }
    }
}

/// 带缓存的候选属性选择器
///
/// 候选集只取决于 (类型, 模式)，按此键缓存
#[derive(Debug, Default)]
pub struct CandidateSelector {
    cache: DashMap<(TypeId, InjectionMode), Arc<dyn Any + Send + Sync>>,
}

impl CandidateSelector {
    /// 创建新的选择器
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取类型在指定模式下的候选属性
    pub fn select<T: Injectable>(&self, mode: InjectionMode) -> Arc<Vec<PropertyDescriptor<T>>> {
        let key = (TypeId::of::<T>(), mode);

        let cached = self.cache.get(&key).map(|entry| Arc::clone(entry.value()));
        if let Some(candidates) = cached.and_then(|erased| erased.downcast().ok()) {
            return candidates;
        }

        let candidates = Arc::new(select_candidates(&T::properties(), mode));
        debug!(
            "计算候选属性: {} [{}] -> {:?}",
            std::any::type_name::<T>(),
            mode,
            candidates.iter().map(|p| p.name()).collect::<Vec<_>>()
        );

        self.cache.insert(key, candidates.clone());
        candidates
    }

    /// 已缓存的 (类型, 模式) 数量
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
