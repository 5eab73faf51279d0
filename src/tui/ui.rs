use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ConfirmDialog, ContainerList, ErrorDialog, MessageDialog, ProgressIndicator, PromptDialog,
    TitleBar, TopDialog,
};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Draws the list, then every open overlay from lowest to highest priority
/// so the one receiving keys ends up on top.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0)]);
    let [title_area, main_area] = layout.areas(frame.area());

    TitleBar::new(
        app.engine.name().to_string(),
        app.engine_url.clone(),
        app.status_message.clone(),
    )
    .render(frame, title_area);

    ContainerList {
        app,
        style: &tui.style,
    }
    .render(frame, main_area);

    let area = frame.area();
    let feedback = &app.feedback;

    tui.create_dialog.render(frame, area);

    if let Some(prompt) = &feedback.prompt {
        PromptDialog::new(&tui.prompt_dialog, prompt, &tui.style).render(frame, area);
    }
    if let Some(confirm) = &feedback.confirm {
        ConfirmDialog::new(&tui.confirm_dialog, confirm, &tui.style).render(frame, area);
    }
    if let Some(top) = &feedback.top {
        TopDialog::new(&mut tui.top_dialog, top, &tui.style).render(frame, area);
    }
    if let Some(message) = &feedback.message {
        MessageDialog::new(&mut tui.message_dialog, message, &tui.style)
            .queued(feedback.queued_message_count())
            .render(frame, area);
    }
    if let Some(error) = &feedback.error {
        ErrorDialog {
            text: error,
            style: &tui.style,
        }
        .render(frame, area);
    }
    if let Some(title) = &feedback.progress {
        ProgressIndicator {
            title,
            spinner_frame: tui.spinner_frame,
            style: &tui.style,
        }
        .render(frame, main_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{container, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        tui.sync(app);
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn list_and_title_render_without_overlays() {
        let (mut app, _engine) = test_app();
        app.containers = vec![container("0123456789abcdef", "web")];
        app.status_message = "1 containers".into();
        let mut tui = TuiState::new(Default::default());
        let screen = draw(&app, &mut tui);
        assert!(screen.contains("podterm ("));
        assert!(screen.contains("web"));
        assert!(!screen.contains("ERROR"));
    }

    #[test]
    fn error_is_drawn_over_message() {
        let (mut app, _engine) = test_app();
        app.feedback.show_message("podman container inspect", "{}");
        app.feedback.show_error("no such container");
        app.feedback.progress = Some("container inspect in progress".into());
        let mut tui = TuiState::new(Default::default());
        let screen = draw(&app, &mut tui);
        assert!(screen.contains("no such container"));
        assert!(screen.contains("container inspect in progress"));
    }

    #[test]
    fn waiting_reports_are_counted_on_the_open_one() {
        let (mut app, _engine) = test_app();
        app.feedback.show_message("podman container inspect", "{}");
        app.feedback.show_logs("podman container logs", "INFO ok");
        let mut tui = TuiState::new(Default::default());
        let screen = draw(&app, &mut tui);
        assert!(screen.contains("podman container inspect (+1 more)"));
    }
}
