//! `tendril animate` - choreography timeline preview
//!
//! Steps a coordinator at a fixed tick and prints each instance's state,
//! which is the quickest way to eyeball stagger timing before wiring the
//! weight maps into a host.

use anyhow::Result;
use clap::Args;

use tendril_core::Choreographer;

#[derive(Args)]
pub struct AnimateArgs {
    /// Number of tentacle instances
    #[arg(long, default_value_t = 4)]
    pub count: usize,

    /// Delay before the first instance emerges, seconds
    #[arg(long, default_value_t = 0.0)]
    pub base_delay: f32,

    /// Extra delay per instance, seconds
    #[arg(long, default_value_t = 0.35)]
    pub stagger: f32,

    /// Total simulated time, seconds
    #[arg(long, default_value_t = 6.0)]
    pub duration: f32,

    /// Simulation tick, seconds
    #[arg(long, default_value_t = 0.5)]
    pub dt: f32,

    /// Trigger an attack at this time, seconds
    #[arg(long)]
    pub attack_at: Option<f32>,

    /// Trigger retraction at this time, seconds
    #[arg(long)]
    pub retract_at: Option<f32>,
}

pub fn run(args: AnimateArgs) -> Result<()> {
    let mut choreo = Choreographer::new(args.count, args.base_delay, args.stagger);
    choreo.trigger_emergence();

    for i in 0..choreo.instance_count() {
        println!("[{i}] emerges at {:.2}s", choreo.emergence_delay(i));
    }

    let mut time = 0.0f32;
    println!("{:>6}  states", "time");
    while time < args.duration {
        time += args.dt;
        if let Some(at) = args.attack_at {
            if time - args.dt < at && at <= time {
                choreo.trigger_attack();
            }
        }
        if let Some(at) = args.retract_at {
            if time - args.dt < at && at <= time {
                choreo.trigger_retraction();
            }
        }

        let weights = choreo.update(args.dt);
        let states: Vec<String> = choreo
            .states()
            .iter()
            .map(|s| format!("{s:?}"))
            .collect();
        println!("{time:>6.2}  {}", states.join(" "));

        // Show the first instance's blended weights when it has any
        if let Some(first) = weights.first() {
            if !first.is_empty() {
                let mut entries: Vec<String> = first
                    .iter()
                    .map(|(key, weight)| format!("{}={weight:.2}", key.name()))
                    .collect();
                entries.sort();
                println!("        [0] {}", entries.join(" "));
            }
        }
    }
    Ok(())
}
