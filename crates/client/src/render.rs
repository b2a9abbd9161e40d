//! Battle view drawn with `ratatui`.
//!
//! Layout, top to bottom: header (turn, faction, phase), the grid next to the
//! roster, the message log and a key help footer.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tactics_core::{Actor, BattleOutcome, Faction, Frame as BattleFrame, Position, Renderer, Terrain};

use crate::messages::MessageLog;

const FOOTER: &str = "arrows/hjkl move  enter confirm  f attack  esc cancel  q quit";

/// [`Renderer`] that draws each frame onto a `ratatui` terminal.
pub struct TuiRenderer<B: Backend> {
    terminal: Terminal<B>,
    messages: Rc<RefCell<MessageLog>>,
}

impl<B: Backend> TuiRenderer<B> {
    pub fn new(terminal: Terminal<B>, messages: Rc<RefCell<MessageLog>>) -> Self {
        Self { terminal, messages }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Renderer for TuiRenderer<B> {
    fn draw(&mut self, battle: &BattleFrame<'_>) {
        let messages = self.messages.borrow();
        let result = self.terminal.draw(|frame| {
            render_battle(frame, battle, &messages);
        });
        if let Err(e) = result {
            tracing::warn!("failed to draw frame: {e}");
        }
    }
}

/// Composes every panel of the battle screen.
pub fn render_battle(frame: &mut ratatui::Frame, battle: &BattleFrame<'_>, messages: &MessageLog) {
    let log_height = u16::try_from(MessageLog::DEFAULT_CAPACITY).unwrap_or(u16::MAX) + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header
            Constraint::Min(0),             // Grid and roster
            Constraint::Length(log_height), // Messages
            Constraint::Length(1),          // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], battle);

    let map_width = u16::try_from(battle.grid.dimensions().cols)
        .unwrap_or(u16::MAX / 2)
        .saturating_mul(2)
        .saturating_add(3);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(map_width), Constraint::Min(0)])
        .split(chunks[1]);
    render_grid(frame, body[0], battle);
    render_roster(frame, body[1], battle);

    render_messages(frame, chunks[2], messages);
    frame.render_widget(
        Paragraph::new(FOOTER).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn render_header(frame: &mut ratatui::Frame, area: Rect, battle: &BattleFrame<'_>) {
    let mut spans = vec![
        Span::raw("Turn "),
        Span::styled(battle.turn.number.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
    ];
    match battle.outcome {
        Some(BattleOutcome::Victory(faction)) => spans.push(Span::styled(
            format!("{faction} wins"),
            faction_style(faction).add_modifier(Modifier::BOLD),
        )),
        Some(BattleOutcome::Draw) => {
            spans.push(Span::styled("draw", Style::default().add_modifier(Modifier::BOLD)))
        }
        None => {
            spans.push(Span::styled(
                battle.turn.active.to_string(),
                faction_style(battle.turn.active),
            ));
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                battle.phase.to_string(),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
            if let Some(left) = battle.turn.remaining {
                spans.push(Span::raw(format!(" | {left} left")));
            }
        }
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Battle"));
    frame.render_widget(paragraph, area);
}

fn render_grid(frame: &mut ratatui::Frame, area: Rect, battle: &BattleFrame<'_>) {
    let paragraph = Paragraph::new(grid_lines(battle))
        .block(Block::default().borders(Borders::ALL).title("Map"));
    frame.render_widget(paragraph, area);
}

/// One line per grid row, two columns per cell. The selector cell is reversed.
pub fn grid_lines(battle: &BattleFrame<'_>) -> Vec<Line<'static>> {
    battle
        .grid
        .rows()
        .enumerate()
        .map(|(y, row)| {
            let spans = row.iter().enumerate().flat_map(|(x, &terrain)| {
                let position = Position::new(x as i32, y as i32);
                let (glyph, mut style) = match battle.roster.at(position) {
                    Some(actor) => (unit_glyph(actor), unit_style(actor, battle)),
                    None => (terrain.glyph(), terrain_style(terrain)),
                };
                if position == battle.selector {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                [Span::raw(" "), Span::styled(glyph.to_string(), style)]
            });
            Line::from(spans.collect::<Vec<_>>())
        })
        .collect()
}

fn render_roster(frame: &mut ratatui::Frame, area: Rect, battle: &BattleFrame<'_>) {
    let lines: Vec<Line> = battle
        .roster
        .iter()
        .map(|actor| {
            let hp = actor.hp();
            let status = if !actor.is_alive() {
                "down"
            } else if actor.is_ready() {
                "ready"
            } else {
                "spent"
            };
            Line::from(vec![
                Span::styled(unit_glyph(actor).to_string(), unit_style(actor, battle)),
                Span::raw(format!(
                    " {:<10} {:<8} hp {:>2}/{:<2} {status}",
                    actor.name,
                    actor.class,
                    hp.current(),
                    hp.maximum()
                )),
            ])
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Units"));
    frame.render_widget(paragraph, area);
}

fn render_messages(frame: &mut ratatui::Frame, area: Rect, messages: &MessageLog) {
    let lines: Vec<Line> = messages.lines().map(Line::raw).collect();
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Log"));
    frame.render_widget(paragraph, area);
}

/// Player units in upper case, enemies in lower case.
fn unit_glyph(actor: &Actor) -> char {
    let initial = actor.name.chars().next().unwrap_or('?');
    match actor.faction {
        Faction::Player => initial.to_ascii_uppercase(),
        Faction::Enemy => initial.to_ascii_lowercase(),
    }
}

fn unit_style(actor: &Actor, battle: &BattleFrame<'_>) -> Style {
    let mut style = faction_style(actor.faction);
    if battle.active.is_some_and(|active| active.id == actor.id) {
        style = style.add_modifier(Modifier::BOLD);
    }
    if !actor.is_ready() {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}

fn faction_style(faction: Faction) -> Style {
    match faction {
        Faction::Player => Style::default().fg(Color::Cyan),
        Faction::Enemy => Style::default().fg(Color::LightRed),
    }
}

fn terrain_style(terrain: Terrain) -> Style {
    let color = match terrain {
        Terrain::Plain => Color::DarkGray,
        Terrain::Mountain => Color::Gray,
        Terrain::Forest => Color::Green,
        Terrain::Fortress => Color::Yellow,
        Terrain::Water => Color::Blue,
        Terrain::Wall => Color::White,
    };
    Style::default().fg(color)
}
