//! Light Bulb State Machine
//!
//! This example wires a bulb machine, subscribes to its changes and drives it
//! through a full cycle, including a self-transition and an ignored event.
//!
//! Run with: RUST_LOG=machinarium=trace cargo run --example bulb

use machinarium::{create_machine, event_enum, state_enum, Machine, MachineOptions};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Bulb {
        Off,
        On,
        Broken,
    }
}

event_enum! {
    enum Switch {
        TurnOn,
        TurnOff,
        Break,
        Fix,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Light Bulb State Machine ===\n");

    let mut bulb: Machine<Bulb, Switch> =
        create_machine(MachineOptions::new(Bulb::Off).with_history(true));
    bulb.when([Bulb::Off, Bulb::On], |t| {
        t.on(Switch::Break).transition_to(Bulb::Broken);
    })
    .when(Bulb::Off, |t| {
        t.on(Switch::TurnOn).transition_to(Bulb::On);
        t.on(Switch::TurnOff).transition_to(Bulb::Off);
    })
    .when(Bulb::On, |t| {
        t.on(Switch::TurnOff).transition_to(Bulb::Off);
    })
    .when(Bulb::Broken, |t| {
        t.on(Switch::Fix).transition_to(Bulb::Off);
    });

    let subscription = bulb.subscribe(|| println!("  (subscriber notified)"));

    for event in [
        Switch::TurnOn,
        Switch::Fix,
        Switch::Break,
        Switch::Fix,
        Switch::TurnOff,
    ] {
        let allowed = bulb.can(event.clone());
        println!("send {event:?} (can: {allowed})");
        bulb.send(event);
        println!("  now {:?}", bulb.current_state());
    }

    subscription.unsubscribe();

    if let Some(history) = bulb.history() {
        println!("\nPath: {:?}", history.get_path());
    }

    println!("\n=== Example Complete ===");
}
