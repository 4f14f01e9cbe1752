//! Enumerations for TUI state management.

/// Which part of the page receives key presses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Date,
    Task,
    Time,
    Category,
    Tasks,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Date,
        Focus::Task,
        Focus::Time,
        Focus::Category,
        Focus::Tasks,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_both_ways() {
        assert_eq!(Focus::Tasks.next(), Focus::Date);
        assert_eq!(Focus::Date.prev(), Focus::Tasks);
        assert_eq!(Focus::Task.next().prev(), Focus::Task);
    }
}
