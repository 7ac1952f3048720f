use product_api::{
    app::product::store::ProductStore,
    core::middleware::ApiKey,
    create_app,
    infrastructure::{config::load_config, logger::Logger},
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    Logger::init(&config.logging.level);

    info!("启动 Product API 服务器...");
    info!("使用{}", source);

    let store = ProductStore::seeded();
    info!("✅ 已初始化 {} 个示例产品", store.len());

    let app = create_app(store, ApiKey::new(config.auth.api_key.as_str()));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Product API 运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /                    - 欢迎信息");
    info!("   GET    /api/products        - 产品列表 (category, search, page, limit)");
    info!("   GET    /api/products/stats  - 按分类统计");
    info!("   GET    /api/products/:id    - 获取产品");
    info!("   POST   /api/products        - 创建产品");
    info!("   PUT    /api/products/:id    - 更新产品");
    info!("   DELETE /api/products/:id    - 删除产品");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务器已关闭");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听关闭信号: {}", e);
    }
}
