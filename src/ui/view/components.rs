//! 通用 UI 组件
//!
//! 对话框、输入框等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::theme::Palette;

/// 主题化的基础样式
pub fn base_style(palette: &Palette) -> Style {
    Style::default().fg(palette.foreground).bg(palette.background)
}

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(base_style(palette).fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    palette: &Palette,
) {
    let style = if is_focused {
        base_style(palette)
            .fg(palette.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        base_style(palette).fg(palette.muted)
    };

    let input = Paragraph::new(value)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}
