use anyhow::Context as _;
use font_editor::{App, EditorConfig, EventLoop, FileStore};
use tracing::info;

/// 程序入口点
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = EditorConfig::from_env();
    info!("清单地址: {}", config.base_url);

    // 打开本地存储
    let store = FileStore::open(&config.storage_path)
        .with_context(|| format!("打开本地存储失败: {}", config.storage_path.display()))?;
    info!("本地存储: {}", store.path().display());

    // 创建应用实例
    let mut app = App::new(config, store);

    // 创建事件循环
    let event_loop = EventLoop::new().context("创建事件循环失败")?;

    // 运行应用
    event_loop.run_app(&mut app).context("运行应用失败")?;

    Ok(())
}
