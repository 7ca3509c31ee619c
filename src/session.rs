use std::path::Path;
use std::sync::mpsc::Receiver;

use log::{error, info};
use thiserror::Error;

use crate::config::GameConfig;
use crate::engine::{CycleSummary, Engine};
use crate::events::{Event, EventSink, Request};
use crate::level::Level;
use crate::lexer::{ScriptError, tokenize_file};
use crate::tile::TileAction;
use crate::token::Token;

#[derive(Debug, Error)]
pub enum SessionError {
	#[error("no playable level is open")]
	NoLevel,
	#[error(transparent)]
	Script(#[from] ScriptError),
}

/// Composition root: owns the open level and its engine, turns requests into
/// events. Requests are handled one at a time, to completion.
#[derive(Debug)]
pub struct Session<S: EventSink> {
	config: GameConfig,
	sink: S,
	level: Option<Level>,
	engine: Option<Engine>,
}

impl<S: EventSink> Session<S> {
	pub fn new(config: GameConfig, sink: S) -> Self {
		Self { config, sink, level: None, engine: None }
	}

	pub fn config(&self) -> &GameConfig {
		&self.config
	}
	pub fn level(&self) -> Option<&Level> {
		self.level.as_ref()
	}
	pub fn engine(&self) -> Option<&Engine> {
		self.engine.as_ref()
	}
	pub fn sink(&self) -> &S {
		&self.sink
	}
	pub fn into_sink(self) -> S {
		self.sink
	}

	pub fn handle(&mut self, request: Request) -> Result<(), SessionError> {
		match request {
			Request::SelectLevel(path) => {
				self.open_level(&path);
				Ok(())
			}
			Request::CloseLevel => {
				self.close_level();
				Ok(())
			}
			Request::Run(path) => self.tokenize(&path).map(|_| ()),
			Request::PlayerAction(action) => self.cycle(Some(action)).map(|_| ()),
			Request::Cycle => self.cycle(None).map(|_| ()),
		}
	}

	/// Drains `requests` in arrival order until every sender hangs up.
	/// Failures are logged and do not stop the loop.
	pub fn run(&mut self, requests: Receiver<Request>) -> usize {
		let mut handled = 0;
		for request in requests.iter() {
			if let Err(e) = self.handle(request) {
				error!("{}", e);
			}
			handled += 1;
		}
		handled
	}

	/// Replaces any open level. A broken level file still opens, as a placeholder.
	pub fn open_level(&mut self, path: &Path) {
		self.close_level();
		let level = Level::load(path, &self.config.tile_symbols);
		info!("opened level '{}' ({}x{})", level.name(), level.width(), level.height());
		self.engine = level
			.initial_grid()
			.map(|grid| Engine::with_policy(grid, self.config.enemy_policy.build()));
		self.sink.emit(Event::LevelOpened(level.clone()));
		self.level = Some(level);
	}

	pub fn close_level(&mut self) {
		self.engine = None;
		if let Some(level) = self.level.take() {
			info!("closed level '{}'", level.name());
			self.sink.emit(Event::LevelClosed);
		}
	}

	pub fn tokenize(&mut self, path: &Path) -> Result<Vec<Token>, SessionError> {
		let tokens = tokenize_file(path)?;
		self.sink.emit(Event::TokenizingFinished(tokens.clone()));
		Ok(tokens)
	}

	pub fn cycle(&mut self, player_action: Option<TileAction>) -> Result<CycleSummary, SessionError> {
		let engine = self.engine.as_mut().ok_or(SessionError::NoLevel)?;
		Ok(engine.cycle(player_action, &mut self.sink))
	}
}
