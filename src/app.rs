use crate::*;
use crate::catalog::{AssetEvent, CatalogEvent, CatalogLoader, FontAssetLoader};
use crate::config::EditorConfig;
use crate::editor::FontEditor;
use crate::storage::KeyValueStore;
use crate::widget::EditorWidget;
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};
use winit::event::{ElementState, MouseButton};

/// 应用程序主结构体
pub struct App<S> {
    pub widget: EditorWidget<S>,

    // 后台线程的结果通道
    catalog_receiver: watch::Receiver<CatalogEvent>,
    asset_receiver: watch::Receiver<AssetEvent>,

    // 字体文件下载请求
    asset_requests: mpsc::UnboundedSender<String>,
    requested_face: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(config: EditorConfig, store: S) -> Self {
        let (catalog_sender, catalog_receiver) = watch::channel(CatalogEvent::Pending);
        let (asset_sender, asset_receiver) = watch::channel(AssetEvent::Idle);
        let (asset_requests, asset_request_receiver) = mpsc::unbounded_channel();

        let editor = FontEditor::new(store);
        let app = Self {
            widget: EditorWidget::new(editor, &config),
            catalog_receiver,
            asset_receiver,
            asset_requests,
            requested_face: None,
        };

        start_background_services(config, catalog_sender, asset_sender, asset_request_receiver);

        app
    }

    /// 从后台通道拉取结果，并按需请求字体文件
    fn update_ui_state(&mut self) {
        if self.catalog_receiver.has_changed().unwrap_or(false) {
            let event = self.catalog_receiver.borrow_and_update().clone();
            self.widget.apply_catalog_event(event);
        }

        if self.asset_receiver.has_changed().unwrap_or(false) {
            let event = self.asset_receiver.borrow_and_update().clone();
            self.widget.apply_asset_event(event);
        }

        let wanted = self.widget.wanted_face_url();
        if wanted != self.requested_face {
            if let Some(url) = &wanted {
                debug!("请求字体文件: {}", url);
                if self.asset_requests.send(url.clone()).is_err() {
                    error!("后台服务不可用，无法加载字体文件");
                }
            }
            self.requested_face = wanted;
        }
    }
}

/// 启动后台服务：加载一次清单，然后处理字体文件请求
fn start_background_services(
    config: EditorConfig,
    catalog_sender: watch::Sender<CatalogEvent>,
    asset_sender: watch::Sender<AssetEvent>,
    asset_request_receiver: mpsc::UnboundedReceiver<String>,
) {
    thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("创建异步运行时失败: {}", e);
                let _ = catalog_sender.send(CatalogEvent::Failed(
                    crate::catalog::FETCH_FAILED_MESSAGE.to_string(),
                ));
                return;
            }
        };

        rt.block_on(run_background(config, catalog_sender, asset_sender, asset_request_receiver));
    });
}

async fn run_background(
    config: EditorConfig,
    catalog_sender: watch::Sender<CatalogEvent>,
    asset_sender: watch::Sender<AssetEvent>,
    mut asset_request_receiver: mpsc::UnboundedReceiver<String>,
) {
    let loader = config
        .manifest_url()
        .and_then(|url| CatalogLoader::new(config.http_config.clone(), url));

    let event = match loader {
        Ok(loader) => {
            info!("加载字体清单: {}", loader.manifest_url());
            loader.load().await
        }
        Err(e) => {
            error!("无法创建清单加载器: {}", e);
            CatalogEvent::Failed(e.user_message().to_string())
        }
    };
    let _ = catalog_sender.send(event);

    let asset_loader = match FontAssetLoader::new(config.http_config.clone(), config.asset_cache_config.clone()) {
        Ok(loader) => loader,
        Err(e) => {
            error!("无法创建字体文件加载器: {}", e);
            return;
        }
    };

    while let Some(url) = asset_request_receiver.recv().await {
        let event = asset_loader.load_event(&url).await;
        if asset_sender.send(event).is_err() {
            break;
        }
    }

    debug!("后台服务退出");
}

impl<S: KeyValueStore> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.widget.window_manager.get_window().is_some() {
            return;
        }

        if let Err(e) = self.widget.initialize(event_loop) {
            error!("初始化窗口失败: {}", e);
            event_loop.exit();
            return;
        }

        self.widget.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.widget.draw_content() {
                    error!("绘制失败: {}", e);
                }
            }
            WindowEvent::Resized(size) => {
                self.widget.handle_resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.widget.handle_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                self.widget.handle_click();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.widget.handle_key(&event);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        self.update_ui_state();

        if self.widget.should_redraw() {
            self.widget.request_redraw();
        }

        // 轮询后台通道，20fps
        let next_frame_time = Instant::now() + Duration::from_millis(50);
        event_loop.set_control_flow(winit::event_loop::ControlFlow::WaitUntil(next_frame_time));
    }
}
