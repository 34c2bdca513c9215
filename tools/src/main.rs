//! sim-runner: headless runner and host bridge for the pursuit simulator.
//!
//! Usage:
//!   sim-runner --seed 12345 --steps 100 --height 30 --width 40
//!   sim-runner --config scenario.json --steps 50
//!   sim-runner --config scenario.json --ipc-mode

use anyhow::Result;
use pursuit_core::{
    command::HostCommand,
    config::SimConfig,
    engine::SimEngine,
    types::{EntityKind, Position},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Step { count: u64 },
    Field { source: EntityKind },
    Command { command: HostCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct FieldReply {
    source:    EntityKind,
    unreached: u32,
    rows:      Vec<Vec<u32>>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let steps = parse_arg(&args, "--steps", 100u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let mut config = match config_path {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::new(
            parse_arg(&args, "--height", 30usize),
            parse_arg(&args, "--width", 40usize),
        ),
    };
    if args.iter().any(|a| a == "--seed") {
        config.seed = parse_arg(&args, "--seed", config.seed);
    }

    let run_id = format!("run-{}-{}", config.seed, chrono::Utc::now().timestamp());
    let mut engine = SimEngine::new(run_id, &config)?;

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        println!("Pursuit grid: sim-runner");
        println!("  seed:      {}", config.seed);
        println!("  steps:     {steps}");
        println!("  grid:      {}x{}", config.height, config.width);
        println!("  config:    {}", config_path.unwrap_or("(none)"));
        println!();
        engine.run_steps(steps)?;
        print_summary(&engine);
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut SimEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&engine.snapshot())?)?;
            }
            IpcRequest::Step { count } => {
                engine.run_steps(count)?;
                writeln!(stdout, "{}", serde_json::to_string(&engine.snapshot())?)?;
            }
            IpcRequest::Field { source } => {
                let field = engine.compute_field(source);
                let reply = FieldReply {
                    source,
                    unreached: field.unreached(),
                    rows: field.rows(),
                };
                writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
            }
            IpcRequest::Command { command } => match engine.apply(&command) {
                Ok(()) => writeln!(stdout, "{}", serde_json::to_string(&engine.snapshot())?)?,
                Err(e) => {
                    log::warn!("Rejected command {command:?}: {e}");
                    write_error(&mut stdout, &e.to_string())?;
                }
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

fn print_summary(engine: &SimEngine) {
    let contacts = engine.contacts();

    println!("=== RUN SUMMARY ===");
    println!("  run_id:     {}", engine.run_id);
    println!("  final step: {}", engine.current_step());
    println!("  obstacles:  {}", engine.grid().obstacles().len());
    println!("  humans:     {}", engine.humans().len());
    println!("  zombies:    {}", engine.zombies().len());
    println!("  contacts:   {}", contacts.len());
    println!();
    println!("=== BOARD ===");
    print!("{}", render_board(engine));
}

/// `H` human, `Z` zombie, `*` both, `#` obstacle, `.` empty.
fn render_board(engine: &SimEngine) -> String {
    let grid = engine.grid();
    let mut out = String::with_capacity(grid.cell_count() + grid.height());
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let pos = Position::new(row, col);
            let human = engine.humans().contains(&pos);
            let zombie = engine.zombies().contains(&pos);
            out.push(match (human, zombie) {
                (true, true)  => '*',
                (true, false) => 'H',
                (false, true) => 'Z',
                _ if grid.is_blocked(pos) => '#',
                _ => '.',
            });
        }
        out.push('\n');
    }
    out
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
