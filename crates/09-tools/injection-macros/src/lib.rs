//! # Injection Macros
//!
//! 为结构体生成 `Injectable` 实现：构造步骤和编译时属性表。
//!
//! ## 字段规则
//!
//! - `Option<Arc<dyn Trait>>` 字段是接口属性，`Option<Arc<Concrete>>` 字段是具体类型属性
//! - `pub` 字段视为拥有公开设置器，非 `pub` 字段永远不会被注入
//! - `#[inject]` 为属性添加注入标记，只能用于 `Option<Arc<T>>` 字段
//! - 其余字段在构造时使用 `Default::default()`
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use injection_macros::Injectable;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! #[injectable(provides(dyn Notifier))]
//! pub struct EmailNotifier {
//!     #[inject]
//!     pub template_store: Option<Arc<dyn TemplateStore>>,
//!     pub audit_log: Option<Arc<dyn AuditLog>>,
//!     retries: u32,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 可注入类型派生宏
///
/// # 类型级参数
///
/// - `provides(dyn A, dyn B)` - 生成 `Provides<dyn A>` 等实现，用于按接口注册
/// - `constructor = path` - 使用自定义构造函数 `fn(&dyn ServiceResolver) -> DependencyResult<Self>`
#[proc_macro_derive(Injectable, attributes(inject, injectable))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
