use crate::ScreenMode;
use crate::catalog::Movie;
use crate::core::state::App;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw_ui(frame: &mut Frame, app: &App, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, input_area, main_area, footer_area] = layout.areas(frame.area());

    let title_text = format!("Cinescope | {} | {}", app.mode.label(), app.status_message);
    frame.render_widget(Span::raw(title_text), title_area);

    draw_search_box(frame, input_area, app);
    draw_results(frame, main_area, app, spinner_frame);
    frame.render_widget(footer_line(app), footer_area);
}

fn draw_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let input = match app.mode {
        ScreenMode::Search => Paragraph::new(app.search.raw_input())
            .block(Block::bordered().title("Search movies")),
        ScreenMode::Latest => Paragraph::new("Start typing to search for a movie")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::bordered().title("Search")),
    };
    frame.render_widget(input, area);
}

fn draw_results(frame: &mut Frame, area: Rect, app: &App, spinner_frame: usize) {
    let state = app.fetch_state();

    if state.loading {
        let spinner = SPINNER[spinner_frame % SPINNER.len()];
        let loading = Paragraph::new(format!("{spinner} Loading..."))
            .alignment(Alignment::Center)
            .block(Block::bordered());
        frame.render_widget(loading, area);
        return;
    }

    if let Some(error) = &state.error {
        let error_paragraph = Paragraph::new(format!("Error: {}", error.message()))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(Block::bordered().title("ERROR"));
        frame.render_widget(error_paragraph, area);
        return;
    }

    if let Some(message) = app.empty_message() {
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::bordered());
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .data
        .iter()
        .flat_map(|page| page.movies.iter())
        .map(|movie| ListItem::new(movie_line(movie)))
        .collect();
    let heading = app.results_heading().unwrap_or_default();
    frame.render_widget(List::new(items).block(Block::bordered().title(heading)), area);
}

fn movie_line(movie: &Movie) -> Line<'_> {
    let year = movie
        .release_year()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    Line::from(vec![
        Span::styled(movie.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(year),
        Span::styled(
            format!("  ★ {:.1}", movie.vote_average),
            Style::default().fg(Color::Yellow),
        ),
    ])
}

fn footer_line(app: &App) -> Line<'static> {
    let enabled = Style::default().fg(Color::Magenta);
    let disabled = Style::default().fg(Color::DarkGray);
    let arrow = |active: bool, symbol: &'static str| {
        Span::styled(symbol, if active { enabled } else { disabled })
    };

    Line::from(vec![
        arrow(app.can_go_back(), "◀ "),
        Span::raw(format!("Page {}", app.page())),
        arrow(app.can_go_forward(), " ▶"),
        Span::raw(format!(
            "  | adult: {} | ←/→ page  ^A adult  ^R reload  Tab switch  Esc quit",
            if app.include_adult { "on" } else { "off" }
        )),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fetch::Resolution;
    use crate::test_support::{stub_page, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        terminal.draw(|f| draw_ui(f, app, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_search_screen_shows_prompt() {
        let (app, _catalog, _rx) = test_app(ScreenMode::Search);
        let screen = render(&app);
        assert!(screen.contains("Search for a movie"));
        assert!(screen.contains("Page 1"));
    }

    #[test]
    fn test_loaded_page_lists_movies() {
        let (mut app, _catalog, _rx) = test_app(ScreenMode::Latest);
        let run = app.movies.watch(app.current_query().unwrap()).unwrap();
        app.movies.resolve(Resolution {
            generation: run.generation(),
            result: Ok(stub_page("", 1, false, 3)),
        });

        let screen = render(&app);
        assert!(screen.contains("Latest Movies"));
        assert!(screen.contains("(2001)"));
    }

    #[test]
    fn test_loading_shows_spinner() {
        let (mut app, _catalog, _rx) = test_app(ScreenMode::Latest);
        let _run = app.movies.watch(app.current_query().unwrap());
        assert!(render(&app).contains("Loading..."));
    }
}
