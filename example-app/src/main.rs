//! # 示例应用程序
//!
//! 演示属性注入的三种模式以及配置驱动的提供者创建

use anyhow::Context;
use clap::{Parser, ValueEnum};
use di_abstractions::{InjectionMode, InjectionPolicy, IocContainer};
use di_impl::{InjectorSettings, IocProvider};
use infrastructure_common::{init_logging, load_section, ConfigSource, LoggingConfig};
use injection_macros::Injectable;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn ADSP 属性注入示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "config/app.toml")]
    config: PathBuf,

    /// 环境变量前缀，例如 ADSP__INJECTION__PROPERTY_INJECTION
    #[arg(long, default_value = "ADSP")]
    env_prefix: String,

    /// 日志级别，覆盖配置文件
    #[arg(long)]
    log_level: Option<String>,

    /// 属性注入模式，覆盖配置文件
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// 属性无法解析时报错
    #[arg(long)]
    throw_on_failure: bool,

    /// 依次演示所有模式
    #[arg(long)]
    all_modes: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Disabled,
    MarkedOnly,
    AllInterfaceProperties,
}

impl From<ModeArg> for InjectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Disabled => InjectionMode::Disabled,
            ModeArg::MarkedOnly => InjectionMode::MarkedOnly,
            ModeArg::AllInterfaceProperties => InjectionMode::AllInterfaceProperties,
        }
    }
}

/// 预算存储
pub trait BudgetStore: Send + Sync {
    fn remaining(&self, campaign: &str) -> u64;
}

/// 投放节奏时钟
pub trait PacingClock: Send + Sync {
    fn tick(&self) -> u64;
}

#[derive(Debug, Injectable)]
#[injectable(provides(dyn BudgetStore))]
pub struct InMemoryBudgetStore;

impl BudgetStore for InMemoryBudgetStore {
    fn remaining(&self, campaign: &str) -> u64 {
        campaign.len() as u64 * 1_000
    }
}

#[derive(Debug, Default, Injectable)]
#[injectable(provides(dyn PacingClock))]
pub struct MonotonicClock {
    ticks: AtomicU64,
}

impl PacingClock for MonotonicClock {
    fn tick(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// 竞价服务
#[derive(Injectable)]
pub struct BiddingService {
    pub budget_store: Option<Arc<dyn BudgetStore>>,
    #[inject]
    pub pacing_clock: Option<Arc<dyn PacingClock>>,
}

impl BiddingService {
    fn describe(&self, campaign: &str) -> String {
        let budget = self
            .budget_store
            .as_ref()
            .map(|store| store.remaining(campaign).to_string())
            .unwrap_or_else(|| "<未注入>".to_string());
        let tick = self
            .pacing_clock
            .as_ref()
            .map(|clock| clock.tick().to_string())
            .unwrap_or_else(|| "<未注入>".to_string());
        format!("campaign={campaign} budget={budget} tick={tick}")
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let source = ConfigSource::new()
        .with_file(&args.config)
        .with_env_prefix(&args.env_prefix);

    let mut logging: LoggingConfig = load_section(&source, "logging")?;
    if let Some(level) = &args.log_level {
        logging = logging.with_level(level);
    }
    init_logging(&logging)?;

    info!("启动 Lorn ADSP 属性注入示例");

    if args.all_modes {
        for mode in [
            InjectionMode::Disabled,
            InjectionMode::MarkedOnly,
            InjectionMode::AllInterfaceProperties,
        ] {
            run_demo(InjectionPolicy::new(mode, false))?;
        }
        demonstrate_rejected_policy();
        return Ok(());
    }

    let mut settings = InjectorSettings::load(&source)
        .with_context(|| format!("加载注入配置失败: {}", args.config.display()))?;
    if let Some(mode) = args.mode {
        settings.property_injection = mode.into();
    }
    if args.throw_on_failure {
        settings.throw_if_property_injection_fails = true;
    }

    run_demo(settings.into_validated_policy()?)?;

    info!("应用已完成");
    Ok(())
}

/// 在指定策略下构造竞价服务
fn run_demo(policy: InjectionPolicy) -> anyhow::Result<()> {
    info!("演示属性注入策略: {}", policy);

    let provider = IocProvider::with_policy(Some(policy))?;
    provider.register_singleton_type::<BiddingService, BiddingService>();

    // 依赖在单例注册之后注册，首次解析时仍然可见
    provider.register_type::<dyn BudgetStore, InMemoryBudgetStore>();
    provider.register_singleton_type::<dyn PacingClock, MonotonicClock>();

    let service = provider.resolve::<BiddingService>()?;
    info!("竞价服务: {}", service.describe("spring-sale"));

    let again = provider.resolve::<BiddingService>()?;
    info!(
        "再次解析返回同一实例: {}，{}",
        Arc::ptr_eq(&service, &again),
        again.describe("spring-sale")
    );

    Ok(())
}

/// 演示不受支持的策略组合
fn demonstrate_rejected_policy() {
    let policy = InjectionPolicy::marked_only().with_throw_on_failure(true);
    match IocProvider::with_policy(Some(policy)) {
        Ok(_) => warn!("策略 {} 本应被拒绝", policy),
        Err(e) => info!("策略 {} 被拒绝: {}", policy, e),
    }
}
