//! tablegate - 远程表服务的 REST 门面
//!
//! 启动顺序：加载配置 → 初始化日志 → 解析远程句柄（失败即退出）→ 启动 HTTP

use tablegate::application::MutationGate;
use tablegate::config::{load_config, print_config, LogConfig};
use tablegate::infrastructure::connect_remote;
use tablegate::infrastructure::http::{AppState, HttpServer};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},tablegate={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("tablegate - REST facade for the remote table service");
    print_config(&config);

    // 远程句柄只解析一次，失败则不启动监听
    let remote = connect_remote(&config.remote)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to acquire remote table service: {}", e))?;

    let gate = MutationGate::new(config.remote.serialize_mutations);
    let state = AppState::new(remote, gate);
    let server = HttpServer::new(config.server.clone(), state);

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
