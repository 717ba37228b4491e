//! Frame composition and the vertex-building surface, without a GPU

use flappy_drone::assets::{Assets, SpriteId};
use flappy_drone::renderer::{
    DrawCommand, MeshSurface, compose, execute, screen_to_viewport, viewport_scale,
};
use flappy_drone::renderer::commands::{SCORE_POS, TEXT_SIZE};
use flappy_drone::settings::Settings;
use flappy_drone::sim::{Billboard, GameState, TickInput, tick};

/// Rank of each draw layer, back to front
fn layer(command: &DrawCommand) -> u8 {
    match command {
        DrawCommand::Fill(_) => 0,
        DrawCommand::Blit {
            sprite: SpriteId::Cloud,
            ..
        } => 1,
        DrawCommand::Blit {
            sprite: SpriteId::Billboard,
            ..
        } => 2,
        DrawCommand::Blit {
            sprite: SpriteId::Pipe,
            ..
        }
        | DrawCommand::BlitFlipped {
            sprite: SpriteId::Pipe,
            ..
        } => 3,
        DrawCommand::Blit {
            sprite: SpriteId::Avatar,
            ..
        }
        | DrawCommand::BlitRotated {
            sprite: SpriteId::Avatar,
            ..
        } => 4,
        DrawCommand::Blit {
            sprite: SpriteId::Floor,
            ..
        } => 5,
        DrawCommand::Text { .. } => 6,
        DrawCommand::Present => 7,
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn frames_are_back_to_front_throughout_a_session() {
    let assets = Assets::builtin().unwrap();
    let settings = Settings::default();
    let mut state = GameState::new(21);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for _ in 0..600 {
        tick(&mut state, &input);
        let commands = compose(&state, &assets, &settings);
        let layers: Vec<u8> = commands.iter().map(layer).collect();
        assert!(layers.windows(2).all(|w| w[0] <= w[1]), "{layers:?}");
        assert_eq!(layers.first(), Some(&0));
        assert_eq!(layers.last(), Some(&7));
        assert_eq!(layers.iter().filter(|&&l| l == 4).count(), 1);
        assert_eq!(layers.iter().filter(|&&l| l == 3).count(), state.obstacles.len() * 2);
    }
}

#[test]
fn billboard_sits_behind_pipes() {
    let assets = Assets::builtin().unwrap();
    let mut state = GameState::new(3);
    state.billboard.billboard = Some(Billboard::new(state.pipe_velocity));

    let commands = compose(&state, &assets, &Settings::default());
    let billboard = commands
        .iter()
        .position(|c| c.sprite() == Some(SpriteId::Billboard))
        .unwrap();
    let first_pipe = commands
        .iter()
        .position(|c| c.sprite() == Some(SpriteId::Pipe))
        .unwrap();
    let last_cloud = commands
        .iter()
        .rposition(|c| c.sprite() == Some(SpriteId::Cloud))
        .unwrap();
    assert!(last_cloud < billboard && billboard < first_pipe);
}

#[test]
fn mesh_surface_renders_every_frame() {
    let assets = Assets::builtin().unwrap();
    let settings = Settings::default();
    let mut state = GameState::new(8);
    let mut surface = MeshSurface::new(&assets);

    for _ in 0..90 {
        tick(&mut state, &TickInput::default());
        execute(&mut surface, &compose(&state, &assets, &settings)).unwrap();
        let frame = surface.take_frame().unwrap();
        assert_eq!(frame.clear, assets.sky);
        assert_eq!(frame.vertices.len() % 3, 0);
        assert_eq!(frame.texts[0].text, format!("Score: {}", state.score));
    }
    assert_eq!(surface.frames_presented(), 90);
}

#[test]
fn score_text_reaches_the_presented_frame() {
    let assets = Assets::builtin().unwrap();
    let mut state = GameState::new(3);
    state.score = 12;

    let mut surface = MeshSurface::new(&assets);
    execute(&mut surface, &compose(&state, &assets, &Settings::default())).unwrap();
    let frame = surface.take_frame().unwrap();

    assert_eq!(frame.texts.len(), 1);
    let run = &frame.texts[0];
    assert_eq!(run.text, "Score: 12");
    assert_eq!(run.pos, SCORE_POS);
    assert_eq!(run.color, assets.text);

    // Native aspect: the overlay places the run exactly where the playfield has it
    let [x, y] = screen_to_viewport(run.pos.into(), 400, 600);
    assert!((x - SCORE_POS.x).abs() < 1e-3 && (y - SCORE_POS.y).abs() < 1e-3);
    assert_eq!(TEXT_SIZE * viewport_scale(400, 600), TEXT_SIZE);
}
