//! Game Flow State Machine
//!
//! This demo drives a small game loop through title, gameplay and an
//! inventory overlay.
//!
//! Key concepts:
//! - Handlers that opt into only the callbacks they need
//! - Push/pop overlays that suspend gameplay instead of exiting it
//! - Deriving a trimmed variant of an existing machine
//!
//! Run with: RUST_LOG=framestate=trace cargo run --example game_flow

use framestate::core::{FrameTime, Roles, StateHandler};
use framestate::{state_id, Callbacks, MachineBuilder};
use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

state_id! {
    enum Game: u8 {
        Title,
        Playing,
        Inventory,
        Credits,
    }
}

#[derive(Default, Debug)]
struct Session {
    distance: f32,
    items_checked: u32,
}

struct Playing;

impl StateHandler<Game, Session> for Playing {
    fn roles(&self) -> Roles {
        Roles::LIFECYCLE | Roles::UPDATE | Roles::SUSPEND
    }

    fn on_enter(&mut self, from: Game, _session: &mut Session) {
        println!("  start run (from {from:?})");
    }

    fn on_exit(&mut self, to: Game, session: &mut Session) {
        println!("  end run at {:.2}m (to {to:?})", session.distance);
    }

    fn on_update(&mut self, session: &mut Session, time: FrameTime) {
        session.distance += 4.0 * time.delta;
    }

    fn on_suspend(&mut self, _session: &mut Session) {
        println!("  gameplay suspended");
    }

    fn on_resume(&mut self, _session: &mut Session) {
        println!("  gameplay resumed");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Game Flow State Machine ===\n");

    let session = Rc::new(RefCell::new(Session::default()));
    let mut game = MachineBuilder::create()?
        .with(
            Game::Title,
            Callbacks::new().on_enter(|_, _: &mut Session| println!("  title screen")),
        )
        .with(Game::Playing, Playing)
        .with(
            Game::Inventory,
            Callbacks::new().on_enter(|_, s: &mut Session| s.items_checked += 1),
        )
        .with(
            Game::Credits,
            Callbacks::new().on_enter(|_, _: &mut Session| println!("  rolling credits")),
        )
        .with_context(session.clone())
        .with_stack(4)
        .build()?;

    game.go_to(Game::Playing)?;
    let mut clock = 0.0;
    for frame in 0..120 {
        let delta = 1.0 / 60.0;
        clock += delta;
        if frame == 30 {
            game.push(Game::Inventory)?;
        }
        if frame == 45 {
            game.pop()?;
        }
        game.update(FrameTime::new(delta, clock, clock));
    }
    game.go_to(Game::Credits)?;

    println!("\nSession: {:?}", session.borrow());

    println!("\nDeriving a demo build without the inventory:");
    let mut demo = MachineBuilder::derive(&game)
        .without(Game::Inventory)
        .with_initial_state(Game::Title)
        .build()?;
    demo.go_to(Game::Playing)?;
    if let Err(err) = demo.push(Game::Inventory) {
        println!("  push rejected: {err}");
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
