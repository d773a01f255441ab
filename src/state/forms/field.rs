//! Form field value objects

use std::path::PathBuf;

/// A selectable option for choice fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub key: &'static str,
    pub label: &'static str,
}

impl ChoiceOption {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Input category of a field, used to pick the blank value and key handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Numeric,
    Boolean,
    File,
    Choice(&'static [ChoiceOption]),
}

/// Static description of one input on a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }

    /// Value a field holds before the user touches it
    pub fn blank_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Text | FieldKind::Multiline => FieldValue::Text(String::new()),
            FieldKind::Numeric => FieldValue::Numeric(String::new()),
            FieldKind::Boolean => FieldValue::Boolean(false),
            FieldKind::File => FieldValue::File(None),
            FieldKind::Choice(_) => FieldValue::Choice(None),
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Multiline)
    }

    pub fn options(&self) -> &'static [ChoiceOption] {
        match self.kind {
            FieldKind::Choice(options) => options,
            _ => &[],
        }
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Raw digits as typed; parsed on read
    Numeric(String),
    Boolean(bool),
    /// Reference to a file picked by the user. Contents are never read.
    File(Option<PathBuf>),
    /// Key of the selected option
    Choice(Option<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn numeric(value: impl Into<String>) -> Self {
        FieldValue::Numeric(value.into())
    }

    pub fn choice(key: impl Into<String>) -> Self {
        FieldValue::Choice(Some(key.into()))
    }

    #[cfg(test)]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        FieldValue::File(Some(path.into()))
    }

    /// True when the value would fail a "required" check.
    ///
    /// Booleans are never blank; they carry their own must-be-true rule.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Numeric(s) => s.trim().is_empty(),
            FieldValue::Boolean(_) => false,
            FieldValue::File(path) => path.is_none(),
            FieldValue::Choice(key) => key.as_deref().map_or(true, |k| k.trim().is_empty()),
        }
    }

    /// Textual view of the value (choice key for choices, empty for flags and files)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) | FieldValue::Numeric(s) => s,
            FieldValue::Choice(key) => key.as_deref().unwrap_or(""),
            FieldValue::Boolean(_) | FieldValue::File(_) => "",
        }
    }

    /// Parse as a finite decimal number
    pub fn as_number(&self) -> Option<f64> {
        self.as_text()
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }

    /// Parse the leading integer portion ("12.5" reads as 12, "abc" as None)
    pub fn as_integer(&self) -> Option<i64> {
        let trimmed = self.as_text().trim();
        let mut end = 0;
        for (idx, c) in trimmed.char_indices() {
            if c.is_ascii_digit() || (idx == 0 && (c == '-' || c == '+')) {
                end = idx + c.len_utf8();
            } else {
                break;
            }
        }
        trimmed[..end].parse::<i64>().ok()
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Boolean(true))
    }

    pub fn as_path(&self) -> Option<&PathBuf> {
        match self {
            FieldValue::File(path) => path.as_ref(),
            _ => None,
        }
    }

    /// Return a copy with the character appended, honouring the value kind
    pub fn with_char(&self, c: char) -> Self {
        match self {
            FieldValue::Text(s) => FieldValue::Text(format!("{s}{c}")),
            FieldValue::Numeric(s) => {
                let accepts = c.is_ascii_digit() || (c == '.' && !s.contains('.'));
                if accepts {
                    FieldValue::Numeric(format!("{s}{c}"))
                } else {
                    self.clone()
                }
            }
            FieldValue::File(path) => {
                let mut raw = path
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                raw.push(c);
                FieldValue::File(Some(PathBuf::from(raw)))
            }
            FieldValue::Boolean(_) | FieldValue::Choice(_) => self.clone(),
        }
    }

    /// Return a copy with the last character removed
    pub fn without_last_char(&self) -> Self {
        match self {
            FieldValue::Text(s) => {
                let mut s = s.clone();
                s.pop();
                FieldValue::Text(s)
            }
            FieldValue::Numeric(s) => {
                let mut s = s.clone();
                s.pop();
                FieldValue::Numeric(s)
            }
            FieldValue::File(path) => {
                let mut raw = path
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                raw.pop();
                if raw.is_empty() {
                    FieldValue::File(None)
                } else {
                    FieldValue::File(Some(PathBuf::from(raw)))
                }
            }
            FieldValue::Boolean(_) | FieldValue::Choice(_) => self.clone(),
        }
    }

    /// Flip a boolean; other kinds are returned unchanged
    pub fn toggled(&self) -> Self {
        match self {
            FieldValue::Boolean(b) => FieldValue::Boolean(!b),
            other => other.clone(),
        }
    }

    /// Step to the next (or previous) option, wrapping around
    pub fn cycled(&self, options: &[ChoiceOption], forward: bool) -> Self {
        if options.is_empty() {
            return self.clone();
        }
        let current = match self {
            FieldValue::Choice(Some(key)) => options.iter().position(|o| o.key == key.as_str()),
            _ => None,
        };
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        FieldValue::Choice(Some(options[next].key.to_string()))
    }

    /// Get the display value for rendering
    pub fn display_value(&self, options: &[ChoiceOption]) -> String {
        match self {
            FieldValue::Text(s) | FieldValue::Numeric(s) => s.clone(),
            FieldValue::Boolean(true) => "[x] Yes".to_string(),
            FieldValue::Boolean(false) => "[ ] No".to_string(),
            FieldValue::File(Some(path)) => path.display().to_string(),
            FieldValue::File(None) => String::new(),
            FieldValue::Choice(Some(key)) => options
                .iter()
                .find(|o| o.key == key.as_str())
                .map(|o| o.label.to_string())
                .unwrap_or_else(|| key.clone()),
            FieldValue::Choice(None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOURS: &[ChoiceOption] = &[
        ChoiceOption::new("red", "Red"),
        ChoiceOption::new("green", "Green"),
    ];

    #[test]
    fn test_blank_detection_per_kind() {
        assert!(FieldValue::text("  ").is_blank());
        assert!(FieldValue::Numeric(String::new()).is_blank());
        assert!(FieldValue::File(None).is_blank());
        assert!(FieldValue::Choice(None).is_blank());
        assert!(!FieldValue::Boolean(false).is_blank());
        assert!(!FieldValue::choice("red").is_blank());
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(FieldValue::numeric("1000000").as_number(), Some(1_000_000.0));
        assert_eq!(FieldValue::numeric("abc").as_number(), None);
        assert_eq!(FieldValue::text("inf").as_number(), None);
        assert_eq!(FieldValue::choice("12").as_number(), Some(12.0));
    }

    #[test]
    fn test_integer_parsing_reads_leading_digits() {
        assert_eq!(FieldValue::numeric("500000").as_integer(), Some(500_000));
        assert_eq!(FieldValue::numeric("12.9").as_integer(), Some(12));
        assert_eq!(FieldValue::text("-40x").as_integer(), Some(-40));
        assert_eq!(FieldValue::text("x40").as_integer(), None);
        assert_eq!(FieldValue::text("").as_integer(), None);
    }

    #[test]
    fn test_numeric_rejects_letters_and_second_dot() {
        let v = FieldValue::numeric("1.5");
        assert_eq!(v.with_char('a'), v);
        assert_eq!(v.with_char('.'), v);
        assert_eq!(v.with_char('0'), FieldValue::numeric("1.50"));
    }

    #[test]
    fn test_file_editing_clears_to_none() {
        let v = FieldValue::File(None).with_char('a');
        assert_eq!(v.as_path(), Some(&PathBuf::from("a")));
        assert_eq!(v.without_last_char(), FieldValue::File(None));
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let v = FieldValue::Choice(None);
        let first = v.cycled(COLOURS, true);
        assert_eq!(first, FieldValue::choice("red"));
        assert_eq!(first.cycled(COLOURS, false), FieldValue::choice("green"));
        assert_eq!(
            first.cycled(COLOURS, true).cycled(COLOURS, true),
            FieldValue::choice("red")
        );
    }

    #[test]
    fn test_display_value_uses_option_label() {
        assert_eq!(FieldValue::choice("green").display_value(COLOURS), "Green");
        assert_eq!(FieldValue::Boolean(true).display_value(&[]), "[x] Yes");
    }
}
