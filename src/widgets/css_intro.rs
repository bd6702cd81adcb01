use crate::foundation::error::LessonResult;
use crate::widget::contract::{Interaction, Visualization};

/// Registry key.
pub const KEY: &str = "css-intro-visualization";

/// Style layers that can be switched on and off over the sample page.
const LAYERS: &[(&str, &[&str])] = &[
    (
        "colors",
        &[
            "body { background: #f8fafc; color: #0f172a; }",
            "h1 { color: #2563eb; }",
            "a { color: #db2777; }",
        ],
    ),
    (
        "typography",
        &[
            "body { font-family: system-ui, sans-serif; line-height: 1.6; }",
            "h1 { font-size: 2rem; font-weight: 700; }",
        ],
    ),
    (
        "spacing",
        &[
            "body { margin: 0; padding: 2rem; }",
            "p { margin-bottom: 1rem; }",
        ],
    ),
    (
        "layout",
        &[
            "main { max-width: 40rem; margin: 0 auto; }",
            "nav { display: flex; gap: 1rem; }",
        ],
    ),
];

/// "What does CSS do?": the same HTML page with style layers toggled individually.
#[derive(Debug)]
pub struct CssIntro {
    enabled: [bool; 4],
}

impl Default for CssIntro {
    fn default() -> Self {
        Self {
            enabled: [false; 4],
        }
    }
}

impl CssIntro {
    /// Factory used by the registry.
    pub fn create() -> Box<dyn Visualization> {
        Box::new(Self::default())
    }

    fn layer_index(name: &str) -> Option<usize> {
        LAYERS.iter().position(|(n, _)| *n == name)
    }

    fn active_rules(&self) -> Vec<&'static str> {
        LAYERS
            .iter()
            .zip(self.enabled)
            .filter(|(_, on)| *on)
            .flat_map(|((_, rules), _)| rules.iter().copied())
            .collect()
    }
}

impl Visualization for CssIntro {
    fn key(&self) -> &'static str {
        KEY
    }

    fn title(&self) -> &'static str {
        "Introduction to CSS"
    }

    fn view(&self) -> serde_json::Value {
        let layers: Vec<_> = LAYERS
            .iter()
            .zip(self.enabled)
            .map(|((name, _), on)| serde_json::json!({ "name": name, "enabled": on }))
            .collect();
        let rules = self.active_rules();
        serde_json::json!({
            "layers": layers,
            "stylesheet": rules.join("\n"),
            "rule_count": rules.len(),
            "unstyled": self.enabled.iter().all(|on| !on),
        })
    }

    fn handle(&mut self, input: &Interaction) -> LessonResult<()> {
        match input {
            Interaction::Toggle { control } => {
                let i = Self::layer_index(control).ok_or_else(|| input.unsupported(KEY))?;
                self.enabled[i] = !self.enabled[i];
                Ok(())
            }
            Interaction::Press { control } if control == "all" => {
                self.enabled = [true; 4];
                Ok(())
            }
            Interaction::Press { control } if control == "reset" => {
                self.enabled = [false; 4];
                Ok(())
            }
            _ => Err(input.unsupported(KEY)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/css_intro.rs"]
mod tests;
