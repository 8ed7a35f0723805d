//! Headless driver: scripted input, a text renderer and a tick loop
//!
//! Stands in for the window loop so the world can be exercised and inspected
//! from a terminal or a test.

use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::{Result, bail};
use glam::Vec2;
use tilecraft_core::entity::InputState;
use tilecraft_core::simulation::TILE_SIZE;
use tilecraft_core::world::{FrameSnapshot, TickReport, WorldController};

/// Built-in input scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// No input; the player falls and settles
    Idle,
    /// Walk right, jumping whenever possible
    Explorer,
    /// Walk left and right in alternating stretches
    Patrol,
    /// Stand still, cycle the hotbar and place then remove blocks
    Builder,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Idle,
        Scenario::Explorer,
        Scenario::Patrol,
        Scenario::Builder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Idle => "idle",
            Scenario::Explorer => "explorer",
            Scenario::Patrol => "patrol",
            Scenario::Builder => "builder",
        }
    }

    /// Input for tick number `tick` (starting at 0)
    pub fn input(self, tick: u64) -> InputState {
        match self {
            Scenario::Idle => InputState::default(),
            Scenario::Explorer => InputState {
                move_right: true,
                jump_pressed: true,
                ..InputState::default()
            },
            Scenario::Patrol => {
                let going_right = (tick / 120) % 2 == 0;
                InputState {
                    move_left: !going_right,
                    move_right: going_right,
                    jump_pressed: tick % 30 == 0,
                    ..InputState::default()
                }
            }
            Scenario::Builder => builder_input(tick),
        }
    }
}

impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        match Scenario::ALL.iter().find(|scenario| scenario.name() == lower) {
            Some(scenario) => Ok(*scenario),
            None => bail!(
                "Unknown scenario '{}' (expected idle, explorer, patrol or builder)",
                s
            ),
        }
    }
}

/// Every 20 ticks: pick the next kind, place a row of blocks in the sky, then
/// knock every other one out again
fn builder_input(tick: u64) -> InputState {
    let phase = tick % 20;
    let slot = (tick / 20) % 7;
    let pointer = Vec2::new(64.0 + slot as f32 * TILE_SIZE as f32, 48.0);

    match phase {
        0 => InputState {
            scroll_delta: 1,
            ..InputState::default()
        },
        5 => InputState {
            pointer_screen_pos: Some(pointer),
            left_mouse_pressed: true,
            ..InputState::default()
        },
        10 if slot % 2 == 1 => InputState {
            pointer_screen_pos: Some(pointer),
            right_mouse_pressed: true,
            ..InputState::default()
        },
        _ => InputState::default(),
    }
}

/// Draws a frame as one character per tile cell
pub struct AsciiRenderer {
    /// Viewport width in cells
    pub columns: usize,
    /// Viewport height in cells
    pub rows: usize,
}

impl AsciiRenderer {
    pub const PLAYER: char = '@';
    pub const SKY: char = ' ';

    /// Renderer covering a viewport of `width` x `height` world units
    pub fn for_view(width: f32, height: f32) -> Self {
        let t = TILE_SIZE as f32;
        Self {
            columns: (width / t).ceil().max(1.0) as usize,
            rows: (height / t).ceil().max(1.0) as usize,
        }
    }

    pub fn render(&self, frame: &FrameSnapshot) -> String {
        let t = TILE_SIZE as f32;
        let mut grid = vec![vec![Self::SKY; self.columns]; self.rows];

        for (tile, kind) in &frame.visible_tiles {
            if let Some((col, row)) = self.cell(tile.left() - frame.camera_x, tile.top()) {
                grid[row][col] = kind.glyph();
            }
        }

        // Player cells: every cell whose centre lies inside the player box
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let centre = Vec2::new(
                    frame.camera_x + (col as f32 + 0.5) * t,
                    (row as f32 + 0.5) * t,
                );
                if frame.player_box.contains_point(centre) {
                    *cell = Self::PLAYER;
                }
            }
        }

        let mut out = String::with_capacity((self.columns + 1) * (self.rows + 1));
        for line in grid {
            out.extend(line);
            out.push('\n');
        }
        let _ = writeln!(out, "{}", frame.selected_label);
        out
    }

    /// Cell containing the screen-space point, if it is on screen
    fn cell(&self, screen_x: f32, screen_y: f32) -> Option<(usize, usize)> {
        let t = TILE_SIZE as f32;
        let col = (screen_x / t).floor();
        let row = (screen_y / t).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.columns && row < self.rows).then_some((col, row))
    }
}

/// Aggregated results of a headless run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub chunks_generated: usize,
    pub tiles_generated: usize,
    pub blocks_placed: usize,
    pub blocks_removed: usize,
    pub jumps: usize,
    pub final_position: Vec2,
    pub final_frame: Option<FrameSnapshot>,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport) {
        self.ticks = report.tick;
        self.chunks_generated += report.load.chunks_generated.len();
        self.tiles_generated += report.load.tiles_inserted;
        self.blocks_placed += usize::from(report.placed.is_some());
        self.blocks_removed += usize::from(report.removed.is_some());
        self.jumps += usize::from(report.jumped);
    }
}

/// Drive `controller` with `scenario` for `ticks` ticks
///
/// `on_frame` is called with every `frame_interval`-th report (never when the
/// interval is 0).
pub fn run_scenario(
    controller: &mut WorldController,
    scenario: Scenario,
    ticks: u64,
    frame_interval: u64,
    mut on_frame: impl FnMut(&TickReport),
) -> RunSummary {
    let mut summary = RunSummary::default();

    for tick in 0..ticks {
        let report = controller.tick(&scenario.input(tick));
        summary.record(&report);

        if !report.load.is_empty() {
            log::info!(
                "Tick {}: generated chunks {:?} ({} tiles)",
                report.tick,
                report.load.chunks_generated,
                report.load.tiles_inserted
            );
        }
        if frame_interval > 0 && report.tick % frame_interval == 0 {
            on_frame(&report);
        }
        if tick + 1 == ticks {
            summary.final_frame = Some(report.frame);
        }
    }

    summary.final_position = controller.player().position;
    summary
}
