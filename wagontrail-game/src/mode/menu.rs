//! Numbered command menus shown by content screens.
use smallvec::SmallVec;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCommand<C> {
    pub command: C,
    pub label: String,
}

/// Ordered list of commands selectable by number or by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<C> {
    title: Option<String>,
    items: SmallVec<[MenuCommand<C>; 8]>,
}

impl<C> Default for Menu<C> {
    fn default() -> Self {
        Self {
            title: None,
            items: SmallVec::new(),
        }
    }
}

impl<C: Copy> Menu<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            items: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn item(mut self, command: C, label: impl Into<String>) -> Self {
        self.push(command, label);
        self
    }

    pub fn push(&mut self, command: C, label: impl Into<String>) {
        self.items.push(MenuCommand {
            command,
            label: label.into(),
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve a line to a command: `1..=len` or a case-insensitive label.
    #[must_use]
    pub fn select(&self, input: &str) -> Option<C> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Ok(number) = input.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|idx| self.items.get(idx))
                .map(|item| item.command);
        }
        self.items
            .iter()
            .find(|item| item.label.eq_ignore_ascii_case(input))
            .map(|item| item.command)
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push('\n');
        }
        for (idx, item) in self.items.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", idx + 1, item.label);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Cmd {
        Go,
        Stop,
    }

    fn menu() -> Menu<Cmd> {
        Menu::titled("You may:")
            .item(Cmd::Go, "Continue on trail")
            .item(Cmd::Stop, "Stop to rest")
    }

    #[test]
    fn selects_by_number_or_label() {
        let menu = menu();
        assert_eq!(menu.select("1"), Some(Cmd::Go));
        assert_eq!(menu.select(" 2 "), Some(Cmd::Stop));
        assert_eq!(menu.select("stop to REST"), Some(Cmd::Stop));
        assert_eq!(menu.select("0"), None);
        assert_eq!(menu.select("3"), None);
        assert_eq!(menu.select(""), None);
    }

    #[test]
    fn renders_numbered_lines() {
        assert_eq!(
            menu().render(),
            "You may:\n  1. Continue on trail\n  2. Stop to rest\n"
        );
    }
}
