// Defines tabs and the actions key handling hands back to the main loop.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Clock,
    Alarms,
    Stopwatch,
    Timer,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Clock,
        Tab::Alarms,
        Tab::Stopwatch,
        Tab::Timer,
        Tab::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Clock => "Clock",
            Tab::Alarms => "Alarms",
            Tab::Stopwatch => "Stopwatch",
            Tab::Timer => "Timer",
            Tab::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `'1'..='5'` to a tab.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SaveSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_wrap_both_ways() {
        assert_eq!(Tab::Settings.next(), Tab::Clock);
        assert_eq!(Tab::Clock.previous(), Tab::Settings);
        assert_eq!(Tab::from_digit('3'), Some(Tab::Stopwatch));
        assert_eq!(Tab::from_digit('0'), None);
        assert_eq!(Tab::from_digit('6'), None);
    }
}
