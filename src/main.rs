// ==========================================
// 月度排班系统 - 命令行入口
// ==========================================
// 用法:
//   shift-roster <request.json> [rules.json]
//
// 输出: RosterOutcome JSON 写入 stdout; 日志写入 stderr
// 退出码: 仅在读取/解析失败时非零（规则违规只体现在报告中）
// ==========================================

use anyhow::{bail, Context};
use shift_roster::{logging, RosterOrchestrator, RosterRequest, RuleConfigManager};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(request_path) = args.next() else {
        bail!("用法: shift-roster <request.json> [rules.json]");
    };

    let config = match args.next() {
        Some(rules_path) => RuleConfigManager::new(rules_path),
        None => RuleConfigManager::from_default_location(),
    };

    tracing::info!("==================================================");
    tracing::info!("{} v{}", shift_roster::APP_NAME, shift_roster::VERSION);
    tracing::info!(request = %request_path, rules = %config.path().display(), "加载输入");
    tracing::info!("==================================================");

    let request = RosterRequest::from_json_file(&request_path)
        .with_context(|| format!("无法加载排班请求: {}", request_path))?;

    let orchestrator = RosterOrchestrator::new(Arc::new(config));
    let outcome = orchestrator
        .generate_request(&request)
        .context("排班生成失败")?;

    let json = serde_json::to_string_pretty(&outcome).context("结果序列化失败")?;
    println!("{}", json);

    tracing::info!(
        import_warnings = outcome.import_warnings.len(),
        unresolved = outcome.unresolved_mandatory_violations(),
        "{}",
        outcome.report.summary()
    );
    Ok(())
}
