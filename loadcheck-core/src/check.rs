use std::fmt;

/// A named boolean assertion evaluated against a value.
pub struct Check<'a, T: ?Sized> {
    name: &'static str,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync + 'a>,
}

impl<'a, T: ?Sized> Check<'a, T> {
    pub fn new<P>(name: &'static str, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'a,
    {
        Self {
            name,
            predicate: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn evaluate(&self, value: &T) -> CheckOutcome {
        CheckOutcome {
            name: self.name,
            passed: (self.predicate)(value),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Check<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("name", &self.name).finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
}

/// Evaluate every check against `value`. A failing check never prevents the
/// remaining ones from running.
pub fn evaluate_all<T: ?Sized>(value: &T, checks: &[Check<'_, T>]) -> Vec<CheckOutcome> {
    checks.iter().map(|check| check.evaluate(value)).collect()
}
