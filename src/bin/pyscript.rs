use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use env_logger::Env;
use log::error;
use pyscript::display::count_tiles;
use pyscript::*;

// ---------- Constants ----------
const HELP: &str = "w: forward  s: back  a: turn left  d: turn right  f: attack  .: wait  r: tokenize script  q: quit";

// ---------- View ----------
/// Prints what the session reports.
struct TerminalView {
	symbols: TileSymbols,
}

impl EventSink for TerminalView {
	fn emit(&mut self, event: Event) {
		match event {
			Event::LevelOpened(level) => {
				println!("== {} ==", level.name());
				if let Some(grid) = level.initial_grid() {
					print_grid(&grid, &self.symbols);
					println!(
						"  {} key(s), {} gate(s), {} enemy(ies)",
						count_tiles(&grid, TileType::Key),
						count_tiles(&grid, TileType::Gate),
						count_tiles(&grid, TileType::Enemy)
					);
				}
			}
			Event::LevelClosed => println!("== level closed =="),
			Event::TileChanged { x, y, tile } => {
				println!("  ({}, {}) -> {} facing {}", x, y, self.symbols.to_char(tile.tile_type), tile.tile_direction.to_char());
			}
			Event::TokenizingFinished(tokens) => {
				for line in format_tokens(&tokens) {
					println!("{}", line);
				}
			}
		}
	}
}

fn print_grid(grid: &Grid<TileData>, symbols: &TileSymbols) {
	for (tiles, facings) in format_grid(grid, symbols).iter().zip(format_facings(grid)) {
		println!("  {}   {}", tiles, facings);
	}
}

fn action_for(command: &str) -> Option<TileAction> {
	match command {
		"w" => Some(TileAction::MoveForward),
		"s" => Some(TileAction::MoveBack),
		"a" => Some(TileAction::TurnLeft),
		"d" => Some(TileAction::TurnRight),
		"f" => Some(TileAction::Attack),
		"." => Some(TileAction::Idle),
		_ => None,
	}
}

// ---------- Entry ----------
fn main() {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let config = GameConfig::load_or_default();
	let level_path = match std::env::args().nth(1).map(PathBuf::from).or_else(|| config.levels.first().cloned()) {
		Some(p) => p,
		None => {
			error!("no level given and none configured");
			std::process::exit(2);
		}
	};

	let symbols = config.tile_symbols.clone();
	let mut session = Session::new(config, TerminalView { symbols: symbols.clone() });
	session.open_level(&level_path);
	println!("{}", HELP);

	let mut flag_watch = session.level().map(FlagWatch::new).unwrap_or_default();
	let mut last = None;
	let stdin = io::stdin();
	for line in stdin.lock().lines() {
		let line = match line {
			Ok(l) => l,
			Err(e) => {
				error!("failed to read input: {}", e);
				break;
			}
		};
		for command in line.split_whitespace() {
			match command {
				"q" => return,
				"r" => {
					let script = session.level().and_then(|l| l.script_path()).map(PathBuf::from);
					match script {
						Some(script) => {
							match session.handle(Request::Run(script.clone())) {
								Ok(()) => {}
								Err(SessionError::Script(ScriptError::Lex { source, .. })) => {
									let text = std::fs::read_to_string(&script).unwrap_or_default();
									for line in format_lex_error(&text, &source) {
										println!("error: {}", line);
									}
								}
								Err(e) => println!("error: {}", e),
							}
						}
						None => println!("this level has no script"),
					}
				}
				other => match action_for(other) {
					Some(action) => match session.cycle(Some(action)) {
						Ok(summary) => last = Some(summary),
						Err(e) => println!("error: {}", e),
					},
					None => println!("{}", HELP),
				},
			}
		}

		if let (Some(level), Some(engine)) = (session.level(), session.engine()) {
			println!("{}", format_status(level.name(), last));
			print_grid(engine.grid(), &symbols);
			if flag_watch.update(engine.grid()) {
				println!("flag reached!");
			}
		}
		if let Err(e) = io::stdout().flush() {
			error!("failed to flush output: {}", e);
		}
	}
}
