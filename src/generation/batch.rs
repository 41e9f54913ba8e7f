//! Bounded batch emission for size-limited initializer code.
//!
//! Compilers cap how large a single method may grow, so long runs of
//! generated statements are split into numbered initializer units that are
//! invoked in order from one place.

/// One initializer unit holding at most `limit` statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializerUnit {
    pub name: String,
    pub statements: Vec<String>,
}

/// Finished units plus the invocation sequence that runs them in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedBatches {
    pub units: Vec<InitializerUnit>,
    pub invocations: Vec<String>,
}

/// Accumulates statements and closes a unit every `limit` statements.
///
/// Units are named `{prefix}0`, `{prefix}1`, ... The trailing unit is only
/// emitted when it holds statements, except that an emitter which never saw a
/// statement still yields one empty unit, so the invocation sequence is never
/// empty.
#[derive(Debug)]
pub struct BoundedBatchEmitter {
    limit: usize,
    prefix: String,
    units: Vec<InitializerUnit>,
    current: Vec<String>,
}

impl BoundedBatchEmitter {
    pub fn new(limit: usize, prefix: impl Into<String>) -> Self {
        Self {
            limit: limit.max(1),
            prefix: prefix.into(),
            units: Vec::new(),
            current: Vec::new(),
        }
    }

    pub fn push(&mut self, statement: impl Into<String>) {
        self.current.push(statement.into());
        if self.current.len() >= self.limit {
            self.close_unit();
        }
    }

    pub fn finish(mut self) -> BoundedBatches {
        if !self.current.is_empty() || self.units.is_empty() {
            self.close_unit();
        }
        let invocations = self
            .units
            .iter()
            .map(|unit| format!("{}();", unit.name))
            .collect();
        BoundedBatches {
            units: self.units,
            invocations,
        }
    }

    fn close_unit(&mut self) {
        let name = format!("{}{}", self.prefix, self.units.len());
        let statements = std::mem::take(&mut self.current);
        self.units.push(InitializerUnit { name, statements });
    }
}

impl<S: Into<String>> Extend<S> for BoundedBatchEmitter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for statement in iter {
            self.push(statement);
        }
    }
}
