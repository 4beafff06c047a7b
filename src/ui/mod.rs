mod menu;
mod quiz;
mod result;
mod status;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::Step;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let session = app.session();
    if session.is_loading() {
        status::render_loading(frame, area, app);
    } else if let Some(error) = session.error() {
        status::render_error(frame, area, error);
    } else {
        match session.step() {
            Step::ChooseTopic => menu::render_topics(frame, area, app),
            Step::ChooseDifficulty => menu::render_difficulties(frame, area, app),
            Step::ChooseCount => menu::render_counts(frame, area, app),
            Step::TakingQuiz => quiz::render(frame, area, app),
            Step::ShowResults => result::render(frame, area, app),
        }
    }
}
