//! # 依赖注入具体实现
//!
//! 提供 IoC 提供者、候选属性选择器和属性注入执行器。
//!
//! ```ignore
//! let provider = IocProvider::with_policy(Some(InjectionPolicy::marked_only()))?;
//! provider.register_type::<dyn Notifier, EmailNotifier>();
//! let notifier = provider.resolve::<dyn Notifier>()?;
//! ```

pub mod container;
pub mod injector;
pub mod selector;
pub mod settings;

pub use container::IocProvider;
pub use injector::{InjectionReport, PropertyInjector, ResolutionOutcome};
pub use selector::{select_candidates, CandidateSelector};
pub use settings::{InjectorSettings, INJECTION_SECTION};
