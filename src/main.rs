// ==========================================
// 矿山生产报表 - 命令行入口
// ==========================================
// 用法:
//   mining-report [--config <file>] [--summary] <dataset> [month] [--csv <out>]
// 示例:
//   mining-report production
//   mining-report disruption Januari --csv out/
//   mining-report --config tambang.json fuel --summary
// 输出: stdout 打印行数与加载报告（JSON）;日志写 stderr
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use mining_report::config::{ConfigManager, LoaderConfigReader};
use mining_report::export::export_file_name;
use mining_report::summary::{
    compare_plan, summarize_analysis, summarize_disruptions, summarize_fuel, summarize_production,
    summarize_trips,
};
use mining_report::{logging, perf, DatasetKind, DatasetTable, MiningDataLoader, Month};
use std::path::PathBuf;

const USAGE: &str =
    "用法: mining-report [--config <file>] [--summary] <dataset> [month] [--csv <out>]\n\
     dataset: production | disruption | fuel | trips | plan | realization | production_analysis\n\
     month:   Januari .. Desember（disruption / production_analysis 必填）";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    dataset: DatasetKind,
    month: Option<Month>,
    csv: Option<PathBuf>,
    summary: bool,
}

fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut config = None;
    let mut csv = None;
    let mut summary = false;
    let mut positional = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(PathBuf::from(
                    args.next().ok_or_else(|| anyhow!("--config 缺少文件路径"))?,
                ))
            }
            "--csv" => {
                csv = Some(PathBuf::from(
                    args.next().ok_or_else(|| anyhow!("--csv 缺少输出路径"))?,
                ))
            }
            "--summary" => summary = true,
            "-h" | "--help" => bail!("{}", USAGE),
            other if other.starts_with("--") => bail!("未知参数: {}\n{}", other, USAGE),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let dataset: DatasetKind = positional
        .next()
        .ok_or_else(|| anyhow!("缺少数据集名称\n{}", USAGE))?
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    let month = positional
        .next()
        .map(|m| m.parse::<Month>().map_err(|e| anyhow!(e)))
        .transpose()?;

    if dataset.is_monthly() && month.is_none() {
        bail!("数据集 {} 需要月份参数\n{}", dataset, USAGE);
    }
    if let Some(extra) = positional.next() {
        bail!("多余的参数: {}\n{}", extra, USAGE);
    }

    Ok(CliArgs {
        config,
        dataset,
        month,
        csv,
        summary,
    })
}

/// 汇总结果（JSON）
fn summarize(loader: &MiningDataLoader, table: &DatasetTable) -> Result<serde_json::Value> {
    let value = match table {
        DatasetTable::Production(t) => serde_json::to_value(summarize_production(&t.rows))?,
        DatasetTable::Disruption(t) => serde_json::to_value(summarize_disruptions(&t.rows))?,
        DatasetTable::Fuel(t) => serde_json::to_value(summarize_fuel(&t.rows))?,
        DatasetTable::Trips(t) => serde_json::to_value(summarize_trips(&t.rows))?,
        DatasetTable::Plan(t) => {
            serde_json::to_value(compare_plan(&t.rows, &loader.realization().rows))?
        }
        DatasetTable::Realization(t) => {
            serde_json::to_value(compare_plan(&loader.plan().rows, &t.rows))?
        }
        DatasetTable::ProductionAnalysis(t) => serde_json::to_value(summarize_analysis(&t.rows))?,
    };
    Ok(value)
}

fn run(args: CliArgs) -> Result<()> {
    let config = ConfigManager::load(args.config.as_deref()).context("配置加载失败")?;
    let loader = MiningDataLoader::from_config(&config).context("加载器初始化失败")?;

    tracing::info!(
        dataset = %args.dataset,
        month = ?args.month,
        data_dir = %config.get_data_dir()?.display(),
        "开始加载"
    );

    let table = loader.load(args.dataset, args.month);
    println!("rows: {}", table.len());
    println!("{}", serde_json::to_string_pretty(table.report())?);

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&summarize(&loader, &table)?)?);
    }

    if let Some(out) = args.csv {
        // 输出到目录时按 <数据集>_<YYYYMMDD>.csv 命名
        let path = if out.is_dir() {
            out.join(export_file_name(
                args.dataset.as_str(),
                Local::now().date_naive(),
            ))
        } else {
            out
        };
        let bytes = table.to_csv_bytes()?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("CSV 写入失败: {}", path.display()))?;
        println!("csv: {}", path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    perf::install_from_env();

    tracing::info!("{} v{}", mining_report::APP_NAME, mining_report::VERSION);

    let args = parse_args(std::env::args().skip(1))?;
    run(args)
}
