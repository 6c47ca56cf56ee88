use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use oa_pubstats::config::AppConfig;
use oa_pubstats::filter::filter_by_range;
use oa_pubstats::tooltip::{format_tooltip, round_one_decimal};
use oa_pubstats::viz::{ImageFormat, LegendMode};
use oa_pubstats::{DataStore, YearRange, option, stats, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "oapub",
    version,
    about = "Filter, summarize & chart open-access publication statistics"
)]
struct Cli {
    /// JSON file with yearly records (defaults to the built-in 2020-2025 sample).
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the stacked bar chart to PNG or SVG.
    Chart(ChartArgs),
    /// Print the tooltip for one year.
    Tooltip(TooltipArgs),
    /// Save the selected records as CSV or JSON.
    Export(ExportArgs),
    /// Print aggregate figures for the selected years.
    Stats(RangeArgs),
    /// Print the chart option (ECharts JSON) for the selected years.
    #[command(name = "option")]
    ChartOption(OptionArgs),
    /// List the years available in the data.
    Years,
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// Year (YYYY) or inclusive range (YYYY:YYYY) of years present in the data.
    /// Defaults to the config, then all years.
    #[arg(short, long)]
    range: Option<String>,
}

#[derive(ValueEnum, Clone, Debug)]
enum LegendArg {
    Inside,
    Right,
    Top,
    Bottom,
}

#[derive(ValueEnum, Clone, Debug)]
enum ImageArg {
    Png,
    Svg,
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[command(flatten)]
    range: RangeArgs,
    /// Output path. Defaults to Publications_OA_<start>_<end>.<format> in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Image format when --out is omitted (png or svg).
    #[arg(long, value_enum, default_value = "png")]
    format: ImageArg,
    /// Width of the chart in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Height of the chart in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// Locale for number formatting (en, de, fr, ...).
    #[arg(long)]
    locale: Option<String>,
    /// Legend placement.
    #[arg(long, value_enum)]
    legend: Option<LegendArg>,
    /// Chart title.
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct TooltipArgs {
    /// Year to describe.
    #[arg(short, long)]
    year: i32,
    /// Print the HTML fragment instead of plain text.
    #[arg(long, default_value_t = false)]
    html: bool,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    range: RangeArgs,
    /// Destination file.
    #[arg(long)]
    out: PathBuf,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct OptionArgs {
    #[command(flatten)]
    range: RangeArgs,
    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn fmt_share(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{:.1}%", round_one_decimal(x)),
        _ => "N/A".to_string(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut cfg = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        cfg.data = Some(data);
    }
    let store = DataStore::open(cfg.data.as_deref())?;

    match cli.cmd {
        Command::Chart(args) => cmd_chart(&store, cfg, args),
        Command::Tooltip(args) => cmd_tooltip(&store, &cfg, args),
        Command::Export(args) => cmd_export(&store, &cfg, args),
        Command::Stats(args) => cmd_stats(&store, &cfg, args),
        Command::ChartOption(args) => cmd_option(&store, &cfg, args),
        Command::Years => {
            for y in store.years() {
                println!("{y}");
            }
            Ok(())
        }
    }
}

/// `--range`, else the configured range, else every year in the store.
fn resolve_range(store: &DataStore, cfg: &AppConfig, args: &RangeArgs) -> Result<YearRange> {
    let range = match args.range.as_deref() {
        Some(s) => s.parse::<YearRange>()?,
        None => match cfg.range.or_else(|| store.full_range()) {
            Some(r) => r,
            None => anyhow::bail!("the data set is empty"),
        },
    };
    let range = store
        .check_range(range)
        .with_context(|| format!("range {range} (available: {})", available_years(store)))?;
    log::debug!("selected range {range}");
    Ok(range)
}

fn available_years(store: &DataStore) -> String {
    match store.full_range() {
        Some(r) => r.to_string(),
        None => "none".to_string(),
    }
}

fn cmd_chart(store: &DataStore, mut cfg: AppConfig, args: ChartArgs) -> Result<()> {
    let range = resolve_range(store, &cfg, &args.range)?;
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(l) = args.locale {
        cfg.locale = l;
    }
    if let Some(t) = args.title {
        cfg.title = t;
    }
    if let Some(l) = args.legend {
        cfg.legend = match l {
            LegendArg::Inside => LegendMode::Inside,
            LegendArg::Right => LegendMode::Right,
            LegendArg::Top => LegendMode::Top,
            LegendArg::Bottom => LegendMode::Bottom,
        };
    }
    let format = match args.format {
        ImageArg::Png => ImageFormat::Png,
        ImageArg::Svg => ImageFormat::Svg,
    };
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(viz::export_file_name(range, format)));

    let selected = filter_by_range(store.records(), range);
    if selected.is_empty() {
        anyhow::bail!("no records between {} and {}", range.start(), range.end());
    }
    viz::plot_publications(&selected, &out, &cfg.chart_settings())?;
    eprintln!("Wrote chart to {}", out.display());
    Ok(())
}

fn cmd_tooltip(store: &DataStore, cfg: &AppConfig, args: TooltipArgs) -> Result<()> {
    let record = store
        .records()
        .iter()
        .find(|r| r.year == args.year)
        .ok_or_else(|| anyhow!("no record for year {}", args.year))?;
    let settings = cfg.chart_settings();
    let tip = format_tooltip(record, &settings.categories, &settings.format);
    if args.html {
        println!("{}", tip.to_html());
    } else {
        print!("{tip}");
    }
    Ok(())
}

fn cmd_export(store: &DataStore, cfg: &AppConfig, args: ExportArgs) -> Result<()> {
    let range = resolve_range(store, cfg, &args.range)?;
    let selected = filter_by_range(store.records(), range);
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => args.out.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(&selected, &args.out)?,
        "json" => storage::save_json(&selected, &args.out)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", selected.len(), args.out.display());
    Ok(())
}

fn cmd_stats(store: &DataStore, cfg: &AppConfig, args: RangeArgs) -> Result<()> {
    let range = resolve_range(store, cfg, &args)?;
    let s = stats::range_summary(&filter_by_range(store.records(), range));
    println!(
        "{}  years={} total={} open_access={} closed_access={} oa_share={} peak_year={}",
        range,
        s.years,
        s.total,
        s.open_access,
        s.closed_access,
        fmt_share(s.oa_share),
        s.peak_share_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );
    Ok(())
}

fn cmd_option(store: &DataStore, cfg: &AppConfig, args: OptionArgs) -> Result<()> {
    let range = resolve_range(store, cfg, &args.range)?;
    let selected = filter_by_range(store.records(), range);
    let value = option::chart_option(&selected, range, &cfg.chart_settings());
    let text = serde_json::to_string_pretty(&value)?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, text)?;
            eprintln!("Wrote chart option to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
