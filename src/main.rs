use clap::Parser;
use pathmatch_api::{AppState, RecommendationLimits, RestApi, ServerConfig};
use pathmatch_core::{build_embedder, EmbedderKind};
use pathmatch_moderation::{Blocklist, Moderator};
use pathmatch_recommend::{DEFAULT_JOB_TOP_N, DEFAULT_MENTOR_TOP_N, DEFAULT_USER_TOP_N};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Profile recommendation and content moderation service
#[derive(Parser, Debug)]
#[command(name = "pathmatch")]
#[command(about = "Recommends users, mentors and jobs, and screens content", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Number of HTTP workers (defaults to the number of cores)
    #[arg(long)]
    workers: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Sentence embedder: hash or fastembed
    #[arg(long, default_value_t = EmbedderKind::Hash)]
    embedder: EmbedderKind,

    /// Where the fastembed model is cached
    #[arg(long)]
    model_cache_dir: Option<PathBuf>,

    /// Extra blocked words, one per line
    #[arg(long)]
    blocklist: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_USER_TOP_N)]
    user_top_n: usize,

    #[arg(long, default_value_t = DEFAULT_MENTOR_TOP_N)]
    mentor_top_n: usize,

    #[arg(long, default_value_t = DEFAULT_JOB_TOP_N)]
    job_top_n: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting pathmatch v{}", env!("CARGO_PKG_VERSION"));

    let embedder = build_embedder(args.embedder, args.model_cache_dir.as_deref())?;
    info!(
        model = embedder.model_name(),
        dimension = embedder.dimension(),
        "Embedder initialized"
    );

    let blocklist = match &args.blocklist {
        Some(path) => Blocklist::from_file(path)?,
        None => Blocklist::builtin(),
    };
    info!(words = blocklist.len(), "Moderation blocklist ready");

    let limits = RecommendationLimits {
        users: args.user_top_n,
        mentors: args.mentor_top_n,
        jobs: args.job_top_n,
    };
    let state = AppState::new(embedder, Moderator::new(blocklist), limits);
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        workers: args.workers,
    };

    info!("HTTP API: http://{}:{}/", config.host, config.port);

    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, config).await {
                error!(error = %e, "HTTP server error");
            }
        })
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
