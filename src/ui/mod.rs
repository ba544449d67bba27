use std::{io, time::Duration};

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::{
    config,
    core::World,
    phase::PhaseDriver,
    render,
    scene,
    theme::Theme,
    types::{BodyId, BodySnapshot, Rgb, Vec2},
};

pub struct Options {
    pub columns: u32,
    pub rows: u32,
    pub field_scales: Vec<f32>,
    pub seed: Option<u64>,
    pub theme: Theme,
}

pub fn run(opts: Options) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, opts);
    shutdown_terminal(&mut terminal)?;
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, opts: Options) -> Result<()> {
    let size = terminal.size()?;
    let mut ui_state = UiState::new(size.width, size.height);

    let mut world = World::new();
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // Walls are sized once from the startup viewport; later resizes only
    // change the render target.
    scene::spawn_walls(&mut world, ui_state.world_w, ui_state.world_h);
    for scale in &opts.field_scales {
        scene::spawn_field(
            &mut world,
            &mut rng,
            &opts.theme,
            *scale,
            opts.columns,
            opts.rows,
        );
    }
    let actor = scene::spawn_actor(
        &mut world,
        Vec2::new(ui_state.world_w / 2.0, ui_state.world_h / 2.0),
    );
    let mut driver = PhaseDriver::new(actor, opts.seed);

    let mut snapshot: Vec<BodySnapshot> = Vec::with_capacity(world.body_count());

    let mut accumulator = 0.0_f32;
    let mut last_tick = std::time::Instant::now();
    let mut last_render = std::time::Instant::now();
    let render_interval = Duration::from_secs_f32(1.0 / config::RENDER_HZ);
    let mut sim_counter = 0_u32;
    let mut render_counter = 0_u32;
    let mut last_fps_sample = std::time::Instant::now();
    let mut sim_fps = 0.0_f32;
    let mut render_fps = 0.0_f32;

    loop {
        let now = std::time::Instant::now();
        let dt = (now - last_tick).as_secs_f32();
        last_tick = now;
        accumulator += dt;

        while accumulator >= config::DT {
            driver.step(&mut world);
            if let Some((id, target)) = ui_state.drag {
                world.drag_toward(id, target);
            }
            world.step();
            accumulator -= config::DT;
            sim_counter += 1;
        }

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                CrosstermEvent::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => {}
                },
                CrosstermEvent::Mouse(mouse) => {
                    ui_state.handle_mouse(mouse, &world);
                }
                CrosstermEvent::Resize(width, height) => {
                    // Immediate, no debounce: the framebuffer tracks the new
                    // viewport before the next draw.
                    ui_state.resize_view(width, height);
                }
                _ => {}
            }
        }

        if last_render.elapsed() >= render_interval {
            world.snapshot(&mut snapshot);
            if last_fps_sample.elapsed() >= Duration::from_secs(1) {
                let secs = last_fps_sample.elapsed().as_secs_f32();
                sim_fps = sim_counter as f32 / secs;
                render_fps = render_counter as f32 / secs;
                sim_counter = 0;
                render_counter = 0;
                last_fps_sample = std::time::Instant::now();
            }
            let phase_name = driver.phase().map(|p| p.name()).unwrap_or("-");
            let gravity = world.gravity();
            let bodies = world.body_count();
            let transitions = driver.transitions();
            terminal.draw(|frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(3),
                        Constraint::Length(3),
                    ])
                    .split(frame.size());

                let header = Paragraph::new(format!(
                    "phase: {} | entries: {} | gravity: ({:+.3}, {:+.3}) | bodies: {} | sim fps: {:.1} | render fps: {:.1}",
                    phase_name, transitions, gravity.x, gravity.y, bodies, sim_fps, render_fps
                ))
                .block(Block::default().borders(Borders::ALL).title("skitter"));
                frame.render_widget(header, chunks[0]);

                let inner = chunks[1].inner(&Margin {
                    horizontal: 1,
                    vertical: 1,
                });
                ui_state.view = inner;
                render::draw(
                    &snapshot,
                    render::Viewport {
                        width: inner.width,
                        height: inner.height,
                    },
                    &mut ui_state.framebuf,
                );

                let framebuf = &ui_state.framebuf;
                let lines: Vec<Line> = (0..framebuf.height())
                    .map(|y| {
                        let mut spans: Vec<Span> = Vec::with_capacity(framebuf.width() as usize);
                        for x in 0..framebuf.width() {
                            match framebuf.get(x, y) {
                                Some(color) => spans.push(Span::styled(
                                    render::FILL.to_string(),
                                    Style::default().fg(to_color(color)),
                                )),
                                None => spans.push(Span::raw(" ")),
                            }
                        }
                        Line::from(spans)
                    })
                    .collect();
                let viewport = Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL).title("Field"));
                frame.render_widget(viewport, chunks[1]);

                let footer = Paragraph::new("drag bodies with the mouse | q / Esc: quit")
                    .block(Block::default().borders(Borders::ALL).title("Controls"));
                frame.render_widget(footer, chunks[2]);
            })?;

            last_render = std::time::Instant::now();
            render_counter += 1;
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn shutdown_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

struct UiState {
    framebuf: render::FrameBuffer,
    view: Rect,
    drag: Option<(BodyId, Vec2)>,
    world_w: f32,
    world_h: f32,
}

impl UiState {
    fn new(term_width: u16, term_height: u16) -> Self {
        // Header and footer take three rows each; borders one cell per side.
        let inner_w = term_width.saturating_sub(2).max(1);
        let inner_h = term_height.saturating_sub(8).max(1);
        Self {
            framebuf: render::FrameBuffer::new(inner_w, inner_h),
            view: Rect::new(1, 4, inner_w, inner_h),
            drag: None,
            world_w: inner_w as f32 * config::PX_PER_CELL_X,
            world_h: inner_h as f32 * config::PX_PER_CELL_Y,
        }
    }

    fn resize_view(&mut self, term_width: u16, term_height: u16) {
        let inner_w = term_width.saturating_sub(2).max(1);
        let inner_h = term_height.saturating_sub(8).max(1);
        self.framebuf.resize(inner_w, inner_h);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, world: &World) {
        let point = self.to_world(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag = world.pick_body(point).map(|id| (id, point));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((id, _)) = self.drag {
                    self.drag = Some((id, point));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag = None;
            }
            _ => {}
        }
    }

    fn to_world(&self, column: u16, row: u16) -> Vec2 {
        let cx = column.saturating_sub(self.view.x) as f32;
        let cy = row.saturating_sub(self.view.y) as f32;
        Vec2::new(
            (cx + 0.5) * config::PX_PER_CELL_X,
            (cy + 0.5) * config::PX_PER_CELL_Y,
        )
    }
}

fn to_color(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
