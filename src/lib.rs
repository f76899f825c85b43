pub mod catalog;
pub mod storage;
pub mod editor;
pub mod config;
pub mod font;
pub mod graphics;
pub mod window;
pub mod widget;
pub mod app;

// 导出主要的公共类型
pub use app::App;
pub use config::{EditorConfig, EditorConfigBuilder};
pub use editor::{FontEditor, Selection};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use widget::EditorWidget;

// 重新导出 winit 相关类型
pub use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::EventLoop,
    window::Window,
    dpi::PhysicalSize,
};

// 重新导出其他常用类型
pub use softbuffer::{Context, Surface};
pub use fontdue::{Font, FontSettings};
pub use std::{rc::Rc, num::NonZeroU32};

// 重新导出异步运行时和序列化相关类型
pub use tokio;
pub use serde::{Deserialize, Serialize};
