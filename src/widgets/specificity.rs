use crate::foundation::error::{LessonError, LessonResult};
use crate::widget::contract::{Interaction, Visualization};

/// Registry key.
pub const KEY: &str = "specificity-visualizer";

const INITIAL_SELECTOR: &str = "nav ul li.active > a:hover";

/// Pseudo-elements that may still be written with a single colon.
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

/// Selector specificity as `(ids, classes, types)`, compared lexicographically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct Specificity {
    /// ID selectors.
    pub ids: u32,
    /// Class, attribute and pseudo-class selectors.
    pub classes: u32,
    /// Type selectors and pseudo-elements.
    pub types: u32,
}

impl std::ops::AddAssign for Specificity {
    fn add_assign(&mut self, rhs: Self) {
        self.ids += rhs.ids;
        self.classes += rhs.classes;
        self.types += rhs.types;
    }
}

/// Deepest `:is()`/`:not()`/`:has()` nesting accepted in a selector.
pub const MAX_SELECTOR_NESTING: usize = 32;

/// Compute the specificity of every selector in a comma-separated list.
pub fn selector_list_specificity(list: &str) -> LessonResult<Vec<Specificity>> {
    list_specificity(list, 0)
}

fn list_specificity(list: &str, depth: usize) -> LessonResult<Vec<Specificity>> {
    if depth > MAX_SELECTOR_NESTING {
        return Err(LessonError::interaction(format!(
            "{KEY}: selector nests deeper than {MAX_SELECTOR_NESTING} levels"
        )));
    }
    split_top_level(list)
        .into_iter()
        .map(|s| {
            let chars: Vec<char> = s.trim().chars().collect();
            if chars.is_empty() {
                return Err(LessonError::interaction(format!(
                    "{KEY}: empty selector in '{list}'"
                )));
            }
            compound_specificity(&chars, depth)
        })
        .collect()
}

fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, ch) in list.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '(' | '[' => depth += 1,
                ')' | ']' => depth -= 1,
                ',' if depth == 0 => {
                    parts.push(&list[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(&list[start..]);
    parts
}

fn compound_specificity(chars: &[char], depth: usize) -> LessonResult<Specificity> {
    let mut spec = Specificity::default();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() || matches!(c, '>' | '+' | '~' | '*') => i += 1,
            '#' => {
                i = read_ident(chars, i + 1)?;
                spec.ids += 1;
            }
            '.' => {
                i = read_ident(chars, i + 1)?;
                spec.classes += 1;
            }
            '[' => {
                i = skip_balanced(chars, i, '[', ']')?;
                spec.classes += 1;
            }
            ':' if chars.get(i + 1) == Some(&':') => {
                i = read_ident(chars, i + 2)?;
                if chars.get(i) == Some(&'(') {
                    i = skip_balanced(chars, i, '(', ')')?;
                }
                spec.types += 1;
            }
            ':' => {
                let start = i + 1;
                i = read_ident(chars, start)?;
                let name: String = chars[start..i].iter().collect::<String>().to_ascii_lowercase();
                let args = if chars.get(i) == Some(&'(') {
                    let end = skip_balanced(chars, i, '(', ')')?;
                    let inner: String = chars[i + 1..end - 1].iter().collect();
                    i = end;
                    Some(inner)
                } else {
                    None
                };
                spec += pseudo_class_specificity(&name, args.as_deref(), depth)?;
            }
            c if is_ident_char(c) => {
                i = read_ident(chars, i)?;
                spec.types += 1;
            }
            other => {
                return Err(LessonError::interaction(format!(
                    "{KEY}: unexpected character '{other}' in selector"
                )));
            }
        }
    }
    Ok(spec)
}

fn pseudo_class_specificity(
    name: &str,
    args: Option<&str>,
    depth: usize,
) -> LessonResult<Specificity> {
    if LEGACY_PSEUDO_ELEMENTS.contains(&name) {
        return Ok(Specificity {
            types: 1,
            ..Specificity::default()
        });
    }
    match (name, args) {
        ("where", _) => Ok(Specificity::default()),
        ("not" | "is" | "has", Some(inner)) => Ok(list_specificity(inner, depth + 1)?
            .into_iter()
            .max()
            .unwrap_or_default()),
        _ => Ok(Specificity {
            classes: 1,
            ..Specificity::default()
        }),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn read_ident(chars: &[char], start: usize) -> LessonResult<usize> {
    let mut i = start;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() {
            i += 2;
        } else if is_ident_char(chars[i]) {
            i += 1;
        } else {
            break;
        }
    }
    if i == start {
        return Err(LessonError::interaction(format!(
            "{KEY}: expected a name at offset {start}"
        )));
    }
    Ok(i)
}

/// Returns the index just past the bracket closing the one at `open_at`.
fn skip_balanced(chars: &[char], open_at: usize, open: char, close: char) -> LessonResult<usize> {
    let mut depth = 0u32;
    let mut quote: Option<char> = None;
    for (i, &c) in chars.iter().enumerate().skip(open_at) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == open => depth += 1,
            None if c == close => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            None => {}
        }
    }
    Err(LessonError::interaction(format!(
        "{KEY}: unbalanced '{open}' in selector"
    )))
}

/// Type a selector, see its specificity broken down into columns.
#[derive(Debug)]
pub struct SpecificityCalculator {
    selector: String,
    result: LessonResult<Vec<Specificity>>,
}

impl Default for SpecificityCalculator {
    fn default() -> Self {
        Self {
            selector: INITIAL_SELECTOR.to_string(),
            result: selector_list_specificity(INITIAL_SELECTOR),
        }
    }
}

impl SpecificityCalculator {
    /// Factory used by the registry.
    pub fn create() -> Box<dyn Visualization> {
        Box::new(Self::default())
    }
}

impl Visualization for SpecificityCalculator {
    fn key(&self) -> &'static str {
        KEY
    }

    fn title(&self) -> &'static str {
        "Selector Specificity"
    }

    fn view(&self) -> serde_json::Value {
        match &self.result {
            Ok(specs) => serde_json::json!({
                "selector": self.selector,
                "valid": true,
                "specificity": specs,
                "winning": specs.iter().max(),
            }),
            Err(e) => serde_json::json!({
                "selector": self.selector,
                "valid": false,
                "error": e.to_string(),
            }),
        }
    }

    fn handle(&mut self, input: &Interaction) -> LessonResult<()> {
        match input {
            Interaction::Input { control, text } if control == "selector" => {
                // Invalid selectors are part of the lesson: they are shown, not rejected.
                self.selector = text.clone();
                self.result = selector_list_specificity(text);
                Ok(())
            }
            Interaction::Press { control } if control == "reset" => {
                *self = Self::default();
                Ok(())
            }
            _ => Err(input.unsupported(KEY)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/specificity.rs"]
mod tests;
