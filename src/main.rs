use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use pearl_scheduler::config::{ensure_output_dir, init_logging, Cli};
use pearl_scheduler::{commands_to_json, Scheduler, Snapshot, World};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = ensure_output_dir(&cli.output_dir) {
        log::error!("could not create output directory {:?}: {e}", cli.output_dir);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        log::error!("fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let mut scheduler = Scheduler::new(cli.priority);
    let mut tick: u64 = 0;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read a line from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let snapshot: Snapshot =
            serde_json::from_str(&line).with_context(|| format!("malformed input line: {line}"))?;
        let world = World::from_snapshot(snapshot).context("invalid world snapshot")?;
        log::debug!("tick {tick}: {} workers", world.worker_ids().count());

        let commands = scheduler.step(&world);

        if cli.render_ticks {
            if let Err(e) = pearl_scheduler::render::write_tick_render(&cli.output_dir, tick, &world) {
                log::warn!("failed to render tick {tick}: {e}");
            }
        }

        let json = commands_to_json(&commands);
        writeln!(out, "{json}").context("failed to write to stdout")?;
        out.flush().context("failed to flush stdout")?;

        tick += 1;
    }

    Ok(())
}
