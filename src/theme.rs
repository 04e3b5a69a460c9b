//! 主题控制：浅色 / 深色
//!
//! 当前界面状态是切换的依据，存储中的值只在启动时读取一次。

use ratatui::style::Color;

use crate::models::Theme;
use crate::storage::{KeyValueStore, THEME_KEY, load_value, store_value};

/// 一套终端配色
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub highlight: Color,
    pub muted: Color,
}

const LIGHT_PALETTE: Palette = Palette {
    background: Color::White,
    foreground: Color::Black,
    accent: Color::Blue,
    highlight: Color::Magenta,
    muted: Color::DarkGray,
};

const DARK_PALETTE: Palette = Palette {
    background: Color::Black,
    foreground: Color::White,
    accent: Color::Cyan,
    highlight: Color::Yellow,
    muted: Color::Gray,
};

#[derive(Debug, Default)]
pub struct ThemeController {
    dark_mode: bool,
}

impl ThemeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取保存的主题；任何失败都回退到浅色
    pub fn load(&mut self, store: &dyn KeyValueStore) {
        match load_value::<String>(store, THEME_KEY) {
            Ok(saved) => {
                let theme = saved
                    .as_deref()
                    .map(Theme::from_stored)
                    .unwrap_or_default();
                self.set_theme(theme);
            }
            Err(err) => {
                tracing::error!("Error loading theme: {err}");
                self.set_theme(Theme::Light);
            }
        }
    }

    /// 仅更新界面状态，不写存储
    pub fn set_theme(&mut self, theme: Theme) {
        self.dark_mode = theme == Theme::Dark;
    }

    /// 根据当前界面状态取反并保存
    pub fn toggle(&mut self, store: &mut dyn KeyValueStore) -> Theme {
        let new_theme = self.current().opposite();
        self.set_theme(new_theme);

        if let Err(err) = store_value(store, THEME_KEY, &new_theme.as_str()) {
            tracing::error!("Error saving theme: {err}");
        }
        new_theme
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    pub fn current(&self) -> Theme {
        if self.is_dark() { Theme::Dark } else { Theme::Light }
    }

    /// 深色时显示太阳（切回浅色），否则显示月亮
    pub fn glyph(&self) -> &'static str {
        if self.is_dark() { "🌞" } else { "🌙" }
    }

    pub fn palette(&self) -> Palette {
        if self.is_dark() { DARK_PALETTE } else { LIGHT_PALETTE }
    }
}
