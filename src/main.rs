// ==========================================
// 密封件生产计划系统 - 命令行入口
// ==========================================
// 用法:
//   seal-planner rates    <history.csv> [dimension] [window]
//   seal-planner stats    <history.csv> [window]
//   seal-planner project  <start> <minutes> <category>
//   seal-planner schedule <history.csv> <start> [--deadline <instant>] <category>=<qty>...
//
// 窗口: [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--last week|month|year] [--days all|weekdays|shift]
// 时刻格式: YYYY-MM-DDTHH:MM 或 "YYYY-MM-DD HH:MM"
// 配置: SEAL_PLANNER_CONFIG 指定日历文件,缺省使用内置车间日历
//       SEAL_PLANNER_LOG_FORMAT=json 输出 JSON 行日志
// ==========================================

use anyhow::{anyhow, bail, Context};
use chrono::{Local, NaiveDate, NaiveDateTime};
use seal_planner::config::{config_keys, ConfigManager};
use seal_planner::domain::{Category, Dimension, PlannedOrder};
use seal_planner::importer::HistoryCsvImporter;
use seal_planner::{logging, DatePreset, DayFilter, PlanningApi, RecordWindow};
use serde::Serialize;
use tracing::warn;

fn main() -> anyhow::Result<()> {
    match std::env::var(config_keys::LOG_FORMAT) {
        Ok(format) if format.trim().eq_ignore_ascii_case("json") => logging::init_json(),
        _ => logging::init(),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!("{}", usage());
    };

    let config = ConfigManager::from_env().context("加载配置失败")?;
    let api = PlanningApi::new(config);

    match command.as_str() {
        "rates" => {
            let (positional, window) = parse_window(rest)?;
            let path = positional.first().ok_or_else(|| anyhow!(usage()))?;
            let records = api.filter_records(&load_history(path)?, &window)?;
            let dimension = match positional.get(1) {
                Some(name) => name.parse::<Dimension>()?,
                None => api.config().default_group_by,
            };
            print_json(&api.throughput_breakdown(&records, dimension))
        }
        "stats" => {
            let (positional, window) = parse_window(rest)?;
            let path = positional.first().ok_or_else(|| anyhow!(usage()))?;
            print_json(&api.production_summary_within(&load_history(path)?, &window)?)
        }
        "project" => {
            let [start, minutes, category] = rest else {
                bail!("{}", usage());
            };
            let minutes: f64 = minutes.parse().with_context(|| format!("工时格式错误: {}", minutes))?;
            let done = api.project_completion(parse_instant(start)?, minutes, &Category::new(category))?;
            println!("{}", done.format("%Y-%m-%d %H:%M:%S"));
            Ok(())
        }
        "schedule" => {
            let (path, start, tail) = match rest {
                [path, start, tail @ ..] => (path, start, tail),
                _ => bail!("{}", usage()),
            };
            let records = load_history(path)?;
            let rates = api.estimate_rates(&records, Dimension::SealType);

            let mut deadline = None;
            let mut orders = Vec::new();
            let mut iter = tail.iter();
            while let Some(arg) = iter.next() {
                if arg == "--deadline" {
                    let raw = iter.next().ok_or_else(|| anyhow!("--deadline 缺少参数"))?;
                    deadline = Some(parse_instant(raw)?);
                } else {
                    orders.push(parse_order(arg)?);
                }
            }

            let result = api.schedule_batch(&orders, &rates, parse_instant(start)?, deadline)?;
            print_json(&result)
        }
        other => bail!("未知命令: {}\n{}", other, usage()),
    }
}

fn usage() -> &'static str {
    "用法: seal-planner <rates|stats|project|schedule> ..."
}

fn load_history(path: &str) -> anyhow::Result<Vec<seal_planner::HistoricalRecord>> {
    let report = HistoryCsvImporter::new()
        .import_file(path)
        .with_context(|| format!("读取台账失败: {}", path))?;
    for rejection in &report.rejected {
        warn!(row = rejection.row_number, reason = %rejection.reason, "台账行已忽略");
    }
    Ok(report.records)
}

/// 拆分位置参数与窗口参数
fn parse_window(args: &[String]) -> anyhow::Result<(Vec<&str>, RecordWindow)> {
    let mut positional = Vec::new();
    let mut window = RecordWindow::all();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = || {
            iter.next()
                .map(String::as_str)
                .ok_or_else(|| anyhow!("{} 缺少参数", arg))
        };
        match arg.as_str() {
            "--from" => window.from = Some(parse_date(value()?)?),
            "--to" => window.to = Some(parse_date(value()?)?),
            "--last" => {
                let preset: DatePreset = value()?.parse()?;
                let days = window.days;
                window = RecordWindow::preset(preset, Local::now().date_naive()).with_days(days);
            }
            "--days" => window.days = value()?.parse::<DayFilter>()?,
            other => positional.push(other),
        }
    }
    Ok((positional, window))
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").with_context(|| format!("日期格式错误: {}", raw))
}

fn parse_instant(raw: &str) -> anyhow::Result<NaiveDateTime> {
    let value = raw.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| anyhow!("时刻格式错误: {}", raw))
}

/// 解析 `<category>=<qty>`
fn parse_order(raw: &str) -> anyhow::Result<PlannedOrder> {
    let (category, quantity) = raw
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("订单格式错误: {} (期望 <category>=<qty>)", raw))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .with_context(|| format!("订单数量错误: {}", raw))?;
    Ok(PlannedOrder::new(category, quantity))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
