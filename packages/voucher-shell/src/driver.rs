//! Runs [`Command`]s against a [`UrlStore`] and feeds the results back.

use crate::config::Config;
use crate::machine::{Command, Machine, ShellEvent};
use crate::store::UrlStore;

/// Perform a single storage command and return its completion event.
pub async fn execute<S: UrlStore>(store: &S, key: &str, command: Command) -> ShellEvent {
    match command {
        Command::Load => ShellEvent::Loaded(store.get(key).await),
        Command::Store(url) => {
            let result = store.set(key, url.as_str()).await;
            ShellEvent::Stored(result.map(|()| url))
        }
        Command::Remove => ShellEvent::Removed(store.remove(key).await),
    }
}

/// A [`Machine`] bound to a store, for headless use.
///
/// Each call to [`Driver::dispatch`] runs until the machine is idle again.
pub struct Driver<S> {
    machine: Machine,
    store: S,
    config: Config,
}

impl<S: UrlStore> Driver<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, Config::default())
    }

    pub fn with_config(store: S, config: Config) -> Self {
        Self {
            machine: Machine::new(),
            store,
            config,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn start(&mut self) {
        self.dispatch(ShellEvent::Started).await
    }

    pub async fn dispatch(&mut self, event: ShellEvent) {
        let mut next = self.machine.handle(event);
        while let Some(command) = next {
            let done = execute(&self.store, self.config.storage_key(), command).await;
            next = self.machine.handle(done);
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
