//! Radar Scan Cycle
//!
//! A periodic scan/process/display loop driven by tick events.
//!
//! Key concepts:
//! - `Active` groups the cycle states and answers the `Info` tick for all of them
//! - Leaf states move the cycle forward on every `Update` tick
//! - Handlers recover from their own faults: they log and move to `Halted`
//! - The driver stops ticking once the machine reports `Halted`
//!
//! Run with: cargo run --example radar_cycle

use hierarch::core::{Handlers, Response, Signal};
use hierarch::machine::Machine;
use hierarch::state_enum;
use tracing::{error, info, warn};

state_enum! {
    enum Radar {
        Initial,
        Activate,
        Active,
        GetTargets,
        ProcessTargets,
        UpdateDisplay,
        UpdateAlarm,
        Halted,
    }
}

#[derive(Debug)]
enum Tick {
    Update,
    Info,
}

#[derive(Clone, Debug)]
struct Contact {
    name: &'static str,
    distance: f64,
    hostile: bool,
}

struct RadarScript {
    activation_attempts: u32,
    sweeps: std::vec::IntoIter<Vec<Contact>>,
    contacts: Vec<Contact>,
    display: String,
    alarm: bool,
    alarm_threshold: f64,
}

impl RadarScript {
    fn new(sweeps: Vec<Vec<Contact>>) -> Self {
        Self {
            activation_attempts: 0,
            sweeps: sweeps.into_iter(),
            contacts: Vec::new(),
            display: String::new(),
            alarm: false,
            alarm_threshold: 2_000.0,
        }
    }

    fn activate_sensors(&mut self) -> Result<(), String> {
        self.activation_attempts += 1;
        if self.activation_attempts < 2 {
            return Err("sensor bus not ready".to_string());
        }
        Ok(())
    }

    fn sort_contacts(&mut self) -> Result<(), String> {
        if let Some(bad) = self.contacts.iter().find(|c| !c.distance.is_finite()) {
            return Err(format!("contact {} reported no range", bad.name));
        }
        self.contacts
            .sort_by(|a, b| b.hostile.cmp(&a.hostile).then(a.distance.total_cmp(&b.distance)));
        Ok(())
    }
}

impl Handlers for RadarScript {
    type State = Radar;
    type Event = Tick;

    fn handle(&mut self, state: Radar, signal: &Signal<Tick>) -> Response<Radar> {
        match state {
            Radar::Initial => match signal {
                Signal::Enter => Response::Transition(Radar::Activate),
                _ => Response::Handled,
            },

            Radar::Activate => match signal {
                Signal::Event(Tick::Update) => match self.activate_sensors() {
                    Ok(()) => {
                        info!("sensors activated");
                        Response::Transition(Radar::GetTargets)
                    }
                    Err(reason) => {
                        warn!(%reason, "activation failed, retrying next tick");
                        Response::Handled
                    }
                },
                _ => Response::Handled,
            },

            Radar::Active => match signal {
                Signal::Event(Tick::Info) => {
                    info!(contacts = self.contacts.len(), alarm = self.alarm, "status");
                    Response::Handled
                }
                _ => Response::Handled,
            },

            Radar::GetTargets => match signal {
                Signal::Enter => {
                    self.contacts.clear();
                    Response::Handled
                }
                Signal::Event(Tick::Update) => {
                    self.contacts = self.sweeps.next().unwrap_or_default();
                    Response::Transition(Radar::ProcessTargets)
                }
                _ => Response::Parent(Radar::Active),
            },

            Radar::ProcessTargets => match signal {
                Signal::Event(Tick::Update) => match self.sort_contacts() {
                    Ok(()) => Response::Transition(Radar::UpdateDisplay),
                    Err(reason) => {
                        error!(%reason, "processing failed");
                        Response::Transition(Radar::Halted)
                    }
                },
                _ => Response::Parent(Radar::Active),
            },

            Radar::UpdateDisplay => match signal {
                Signal::Event(Tick::Update) => {
                    self.display = self
                        .contacts
                        .iter()
                        .map(|c| format!("{} {:.0}m", c.name, c.distance))
                        .collect::<Vec<_>>()
                        .join(", ");
                    info!(display = %self.display, "display refreshed");
                    Response::Transition(Radar::UpdateAlarm)
                }
                _ => Response::Parent(Radar::Active),
            },

            Radar::UpdateAlarm => match signal {
                Signal::Event(Tick::Update) => {
                    self.alarm = self
                        .contacts
                        .iter()
                        .any(|c| c.hostile && c.distance < self.alarm_threshold);
                    if self.alarm {
                        warn!("hostile contact inside alarm range");
                    }
                    Response::Transition(Radar::GetTargets)
                }
                _ => Response::Parent(Radar::Active),
            },

            Radar::Halted => Response::Handled,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hierarch=debug")),
        )
        .init();

    println!("=== Radar Scan Cycle ===\n");

    let sweeps = vec![
        vec![
            Contact {
                name: "Freighter",
                distance: 5_400.0,
                hostile: false,
            },
            Contact {
                name: "Raider",
                distance: 3_100.0,
                hostile: true,
            },
        ],
        vec![Contact {
            name: "Raider",
            distance: 1_600.0,
            hostile: true,
        }],
        vec![Contact {
            name: "Ghost",
            distance: f64::NAN,
            hostile: true,
        }],
    ];

    let mut machine = match Machine::new(RadarScript::new(sweeps), Radar::Initial) {
        Ok(machine) => machine,
        Err(err) => {
            error!(%err, "radar failed to start");
            return;
        }
    };

    for tick in 0..20 {
        let event = if tick % 5 == 4 { Tick::Info } else { Tick::Update };
        if let Err(err) = machine.dispatch(event) {
            error!(%err, "state machine fault");
            break;
        }
        println!("tick {tick:>2}: {}", machine.current_label());

        // Freeze periodic activity instead of retrying forever.
        if machine.current() == Radar::Halted {
            break;
        }
    }

    println!("\nTransitions recorded: {}", machine.history().len());
    println!("Last display: {}", machine.handlers().display);

    println!("\n=== Example Complete ===");
}
