use crate::commands::{Catalog, OperationRegistry};
use crate::config::Config;
use crate::error::CalcResult;
use crate::eval;
use crate::format::{Computation, Value};
use crate::history::History;
use log::debug;

/// One calculator session: the two operation catalogs and the history they
/// feed. History only ever grows, and only after a computation succeeded.
pub struct Session {
    config: Config,
    history: History,
    basic: OperationRegistry,
    scientific: OperationRegistry,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            history: History::new(),
            basic: OperationRegistry::for_catalog(Catalog::Basic),
            scientific: OperationRegistry::for_catalog(Catalog::Scientific),
        }
    }

    /// Evaluate a free-form expression and record it on success.
    pub fn evaluate(&mut self, expression: &str) -> CalcResult<Computation> {
        let value = eval::evaluate(expression)?;
        let computation = Computation::new(expression, Value::Float(value));
        self.history.record(computation.record.clone());
        Ok(computation)
    }

    /// Run menu operation `code` from `catalog` on a raw operand line.
    pub fn run(&mut self, catalog: Catalog, code: u8, input: &str) -> CalcResult<Computation> {
        let computation = self.registry(catalog).execute(code, input)?;
        debug!("{:?} #{} -> {}", catalog, code, computation.value);
        self.history.record(computation.record.clone());
        Ok(computation)
    }

    pub fn registry(&self, catalog: Catalog) -> &OperationRegistry {
        match catalog {
            Catalog::Basic => &self.basic,
            Catalog::Scientific => &self.scientific,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
