// ==========================================
// 人工排程引擎 - 命令行入口
// ==========================================
// 用法:
//   labor-schedule schedule <db_path> <jobs.json> [--overtime] [--not-before YYYY-MM-DD]
//   labor-schedule what-if  <db_path> <jobs.json> <hours> <from_date>
//                           [--overtime] [--target YYYY-MM-DD] [--not-before YYYY-MM-DD]
//
// - 配置从 db_path 的 config_kv 表读取（不存在则建表并使用默认值）
// - jobs.json 为作业数组: [{"id", "dueDate", "requiredHours", "isRush"}]
// - 未指定 --not-before 且未配置 schedule_not_before 时，倒排可落位到过去的日期
// - what-if 先以现有作业倒排得到占用台账，再对假设作业试算
// - 结果以 JSON 输出到 stdout，日志输出到 stderr
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use labor_schedule::config::ConfigManager;
use labor_schedule::domain::{
    BackwardScheduleOutput, RawJobRecord, WhatIfProjection, WhatIfToggles,
};
use labor_schedule::engine::{parse_calendar_date, select_schedulable_jobs, CapacityPlanner};
use labor_schedule::logging;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleReport {
    config_snapshot: serde_json::Value,
    excluded: Vec<(String, &'static str)>,
    at_risk_job_ids: Vec<String>,
    total_unscheduled_hours: f64,
    total_overtime_hours: f64,
    schedule: BackwardScheduleOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    what_if: Option<WhatIfProjection>,
}

struct CliArgs {
    command: String,
    db_path: String,
    jobs_path: String,
    include_overtime: bool,
    target_due_date: Option<String>,
    not_before: Option<String>,
    positional: Vec<String>,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| anyhow!(usage()))?;
    let db_path = args.next().ok_or_else(|| anyhow!(usage()))?;
    let jobs_path = args.next().ok_or_else(|| anyhow!(usage()))?;

    let mut include_overtime = false;
    let mut target_due_date = None;
    let mut not_before = None;
    let mut positional = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--overtime" => include_overtime = true,
            "--target" => {
                target_due_date = Some(args.next().context("--target 缺少日期参数")?);
            }
            "--not-before" => {
                not_before = Some(args.next().context("--not-before 缺少日期参数")?);
            }
            _ => positional.push(arg),
        }
    }

    Ok(CliArgs {
        command,
        db_path,
        jobs_path,
        include_overtime,
        target_due_date,
        not_before,
        positional,
    })
}

fn usage() -> String {
    [
        "用法:",
        "  labor-schedule schedule <db_path> <jobs.json> [--overtime] [--not-before YYYY-MM-DD]",
        "  labor-schedule what-if <db_path> <jobs.json> <hours> <from_date> [--overtime] [--target YYYY-MM-DD] [--not-before YYYY-MM-DD]",
        "",
        "--not-before: 倒排不早于该日期（通常为今天）；缺省时使用配置 schedule_not_before，",
        "              两者都未设置则不设下限，作业可能被排到过去的日期",
    ]
    .join("\n")
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args = parse_args()?;
    if args.command != "schedule" && args.command != "what-if" {
        bail!("未知命令 '{}'\n{}", args.command, usage());
    }

    tracing::info!("{} v{}", labor_schedule::APP_NAME, labor_schedule::VERSION);
    tracing::info!("使用数据库: {}", args.db_path);

    let config = Arc::new(
        ConfigManager::new(&args.db_path).map_err(|e| anyhow!("无法打开配置库: {}", e))?,
    );
    let snapshot = config
        .get_config_snapshot()
        .map_err(|e| anyhow!("读取配置快照失败: {}", e))?;

    let raw_jobs = std::fs::read_to_string(&args.jobs_path)
        .with_context(|| format!("无法读取作业文件 {}", args.jobs_path))?;
    let records: Vec<RawJobRecord> =
        serde_json::from_str(&raw_jobs).context("作业文件不是合法的作业数组 JSON")?;

    let intake = select_schedulable_jobs(&records)?;
    for (job_id, reason) in &intake.excluded {
        tracing::warn!(job_id = %job_id, reason = reason, "作业未参与排程");
    }

    let not_before = args
        .not_before
        .as_deref()
        .map(parse_calendar_date)
        .transpose()?;
    let planner = CapacityPlanner::new(config).with_not_before(not_before);
    let schedule = planner
        .schedule_jobs(&intake.jobs, args.include_overtime)
        .await
        .map_err(|e| anyhow!("倒排失败: {}", e))?;

    let what_if = if args.command == "what-if" {
        let [hours, from_date] = args.positional.as_slice() else {
            bail!("what-if 需要 <hours> <from_date>\n{}", usage());
        };
        let required_hours: f64 = hours
            .parse()
            .with_context(|| format!("工时格式错误 '{}'", hours))?;
        let from_date = parse_calendar_date(from_date)?;
        let target_due_date = args
            .target_due_date
            .as_deref()
            .map(parse_calendar_date)
            .transpose()?;

        let toggles = WhatIfToggles {
            allow_overtime: args.include_overtime,
            target_due_date,
        };
        Some(
            planner
                .what_if(required_hours, from_date, &schedule.day_usage, toggles)
                .await
                .map_err(|e| anyhow!("试算失败: {}", e))?,
        )
    } else {
        None
    };

    let report = ScheduleReport {
        config_snapshot: serde_json::from_str(&snapshot)?,
        excluded: intake.excluded,
        at_risk_job_ids: schedule.at_risk_jobs().iter().map(|r| r.id.clone()).collect(),
        total_unscheduled_hours: schedule.total_unscheduled_hours(),
        total_overtime_hours: schedule.total_overtime_hours(),
        schedule,
        what_if,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
