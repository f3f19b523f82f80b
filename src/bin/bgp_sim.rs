//! 路径向量协议仿真
//!
//! 读取 JSON 拓扑描述，按给定协议（BGP / SS-BGP 族）重复运行仿真，
//! 每次运行输出一行统计以及各节点最终选择的路由。

use bgpsim_rs::engine::Engine;
use bgpsim_rs::error::{ConfigError, SimError};
use bgpsim_rs::notify::{Broadcast, NotificationLog, RunStats};
use bgpsim_rs::proto::ProtocolKind;
use bgpsim_rs::sim::{Context, DelayGenerator, NoDelay, RandomDelay, SimTime};
use bgpsim_rs::topo::{ProtocolSpec, TopologySpec};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "bgp_sim", about = "路径向量协议离散事件仿真：BGP / SS-BGP / ISS-BGP")]
struct Args {
    /// 拓扑描述文件（JSON）
    #[arg(long)]
    topology: PathBuf,
    /// 仿真时间阈值：到达该时间仍未收敛则视为不终止
    #[arg(long, default_value_t = 1_000_000)]
    threshold: u64,
    #[arg(long, default_value_t = 1)]
    repetitions: u32,
    /// 时延生成器的初始种子（缺省时随机）
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 0)]
    min_delay: u64,
    /// 为 0 时使用零时延
    #[arg(long, default_value_t = 0)]
    max_delay: u64,
    /// 覆盖所有节点的协议：bgp, ssbgp, issbgp, ssbgp2, issbgp2
    #[arg(long)]
    protocol: Option<String>,
    /// 覆盖所有节点的 MRAI
    #[arg(long)]
    mrai: Option<u64>,
    /// 覆盖所有节点的重新启用间隔
    #[arg(long)]
    reenable: Option<u64>,
    /// Output notifications JSON file
    #[arg(long)]
    notifications_json: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("cannot serialize notifications: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    // 初始化 tracing（写到 stderr，stdout 留给结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let raw = fs::read_to_string(&args.topology).map_err(ConfigError::from)?;
    let spec = TopologySpec::from_json(&raw)?;

    let overrides = ProtocolSpec {
        protocol: args.protocol.as_deref().map(str::parse::<ProtocolKind>).transpose()?,
        mrai: args.mrai,
        reenable: args.reenable,
    };
    let (mut topology, advertisements) = spec.build(&overrides)?;

    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    let delays: Box<dyn DelayGenerator> = if args.max_delay == 0 && args.min_delay == 0 {
        Box::new(NoDelay)
    } else {
        Box::new(RandomDelay::new(args.min_delay, args.max_delay, seed)?)
    };

    let mut sinks = Broadcast::new().with(RunStats::default());
    if args.notifications_json.is_some() {
        sinks = sinks.with(NotificationLog::default());
    }
    let mut engine = Engine::with_context(Context::from_boxed(delays, Box::new(sinks)));

    let threshold = SimTime(args.threshold);
    for rep in 1..=args.repetitions {
        if rep > 1 {
            engine.next_repetition(&mut topology);
        }
        let terminated = engine.simulate(&mut topology, &advertisements, threshold)?;
        let stats = engine.sink_as::<RunStats>().cloned().unwrap_or_default();

        println!(
            "run={rep} seed={} terminated={terminated} time={} convergence={} messages={} detections={} reenables={}",
            stats.seed,
            stats.end_time,
            stats.last_message_time,
            stats.messages_sent,
            stats.detections,
            stats.reenables,
        );
        for node in topology.nodes() {
            let selector = node.protocol().selector();
            let via = selector
                .selected_neighbor()
                .map_or_else(|| "-".to_string(), |n| n.to_string());
            println!(
                "node={} route={} via={via}",
                node.id(),
                selector.selected_route()
            );
        }
        for (tail, head) in topology.disabled_links() {
            println!("disabled_link={tail}->{head}");
        }
    }

    if let Some(path) = args.notifications_json {
        if let Some(log) = engine.sink_as::<NotificationLog>() {
            let json = serde_json::to_string_pretty(&log.events)?;
            fs::write(&path, json).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            eprintln!("wrote notifications to {}", path.display());
        }
    }

    Ok(())
}
