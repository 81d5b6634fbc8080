//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* scene and turns it into cells on the
//! terminal.  No I/O happens here.

pub mod diagram_widget;
pub mod layout;
pub mod popup;
pub mod theme;

use ratatui::{
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::state::{ActiveView, AppState};

use diagram_widget::DiagramWidget;
use layout::AppLayout;
use theme::Theme;

/// Title shown on the diagram border.
pub const TITLE: &str = " U-238 → U-239 → Np-239 → Pu-239 → fission ";

/// Draw one full frame.
pub fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    let block = Block::default()
        .title(TITLE)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());

    let diagram = DiagramWidget::new(&state.scene)
        .marker(state.config.marker)
        .show_footer(state.config.show_footer)
        .block(block);
    frame.render_widget(diagram, layout.diagram_area);

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Diagram => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu | ActiveView::ControlsHelp => "",
    };
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(popup::SettingsPopup { state }, frame.area());
        }
        ActiveView::ControlsHelp => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                },
                frame.area(),
            );
        }
        ActiveView::Diagram => {}
    }
}
