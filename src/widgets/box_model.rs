use crate::foundation::error::{LessonError, LessonResult};
use crate::widget::contract::{Interaction, Visualization};

/// Registry key.
pub const KEY: &str = "box-model-visualizer";

const MAX_SIZE_PX: f64 = 400.0;
const MAX_EDGE_PX: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BoxSizing {
    ContentBox,
    BorderBox,
}

impl BoxSizing {
    fn as_css(self) -> &'static str {
        match self {
            Self::ContentBox => "content-box",
            Self::BorderBox => "border-box",
        }
    }
}

/// Box model sliders: content, padding, border and margin around one element.
#[derive(Debug)]
pub struct BoxModel {
    width: u32,
    height: u32,
    padding: u32,
    border: u32,
    margin: u32,
    sizing: BoxSizing,
}

impl Default for BoxModel {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            padding: 20,
            border: 4,
            margin: 16,
            sizing: BoxSizing::ContentBox,
        }
    }
}

/// Resolved sizes along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Axis {
    content: u32,
    rendered: u32,
    occupied: u32,
}

impl BoxModel {
    /// Factory used by the registry.
    pub fn create() -> Box<dyn Visualization> {
        Box::new(Self::default())
    }

    fn resolve(&self, declared: u32) -> Axis {
        let chrome = 2 * (self.padding + self.border);
        let (content, rendered) = match self.sizing {
            BoxSizing::ContentBox => (declared, declared + chrome),
            BoxSizing::BorderBox => (declared.saturating_sub(chrome), declared.max(chrome)),
        };
        Axis {
            content,
            rendered,
            occupied: rendered + 2 * self.margin,
        }
    }

    fn css(&self) -> String {
        format!(
            "width: {}px; height: {}px; padding: {}px; border: {}px solid; margin: {}px; box-sizing: {};",
            self.width,
            self.height,
            self.padding,
            self.border,
            self.margin,
            self.sizing.as_css()
        )
    }
}

fn slider(control: &str, value: f64, max: f64) -> LessonResult<u32> {
    if !value.is_finite() {
        return Err(LessonError::interaction(format!(
            "{KEY}: '{control}' must be finite"
        )));
    }
    Ok(value.round().clamp(0.0, max) as u32)
}

impl Visualization for BoxModel {
    fn key(&self) -> &'static str {
        KEY
    }

    fn title(&self) -> &'static str {
        "The CSS Box Model"
    }

    fn view(&self) -> serde_json::Value {
        let w = self.resolve(self.width);
        let h = self.resolve(self.height);
        serde_json::json!({
            "box_sizing": self.sizing.as_css(),
            "declared": { "width": self.width, "height": self.height },
            "edges": { "padding": self.padding, "border": self.border, "margin": self.margin },
            "content": { "width": w.content, "height": h.content },
            "rendered": { "width": w.rendered, "height": h.rendered },
            "occupied": { "width": w.occupied, "height": h.occupied },
            "css": self.css(),
        })
    }

    fn handle(&mut self, input: &Interaction) -> LessonResult<()> {
        match input {
            Interaction::Set { control, value } => {
                match control.as_str() {
                    "width" => self.width = slider(control, *value, MAX_SIZE_PX)?,
                    "height" => self.height = slider(control, *value, MAX_SIZE_PX)?,
                    "padding" => self.padding = slider(control, *value, MAX_EDGE_PX)?,
                    "border" => self.border = slider(control, *value, MAX_EDGE_PX)?,
                    "margin" => self.margin = slider(control, *value, MAX_EDGE_PX)?,
                    _ => return Err(input.unsupported(KEY)),
                }
                Ok(())
            }
            Interaction::Toggle { control } if control == "box-sizing" => {
                self.sizing = match self.sizing {
                    BoxSizing::ContentBox => BoxSizing::BorderBox,
                    BoxSizing::BorderBox => BoxSizing::ContentBox,
                };
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
#[path = "../../tests/unit/widgets/box_model.rs"]
mod tests;
