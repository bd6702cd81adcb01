use crate::foundation::error::{LessonError, LessonResult};
use crate::widget::contract::{Interaction, Visualization};

/// Registry key.
pub const KEY: &str = "flexbox-visualizer";

const DIRECTIONS: &[&str] = &["row", "row-reverse", "column", "column-reverse"];
const JUSTIFY: &[&str] = &[
    "flex-start",
    "center",
    "flex-end",
    "space-between",
    "space-around",
    "space-evenly",
];
const ALIGN: &[&str] = &["stretch", "flex-start", "center", "flex-end", "baseline"];
const WRAP: &[&str] = &["nowrap", "wrap", "wrap-reverse"];

const MIN_ITEMS: u8 = 1;
const MAX_ITEMS: u8 = 8;

/// Flex container playground: pick container properties and watch the item order and axes.
#[derive(Debug)]
pub struct Flexbox {
    direction: &'static str,
    justify: &'static str,
    align: &'static str,
    wrap: &'static str,
    items: u8,
}

impl Default for Flexbox {
    fn default() -> Self {
        Self {
            direction: "row",
            justify: "flex-start",
            align: "stretch",
            wrap: "nowrap",
            items: 3,
        }
    }
}

impl Flexbox {
    /// Factory used by the registry.
    pub fn create() -> Box<dyn Visualization> {
        Box::new(Self::default())
    }

    fn container_css(&self) -> String {
        format!(
            "display: flex; flex-direction: {}; justify-content: {}; align-items: {}; flex-wrap: {};",
            self.direction, self.justify, self.align, self.wrap
        )
    }

    fn main_axis(&self) -> &'static str {
        if self.direction.starts_with("row") {
            "horizontal"
        } else {
            "vertical"
        }
    }

    /// Item labels in visual order along the main axis.
    fn visual_order(&self) -> Vec<u8> {
        let mut order: Vec<u8> = (1..=self.items).collect();
        if self.direction.ends_with("-reverse") {
            order.reverse();
        }
        order
    }
}

fn pick(options: &[&'static str], wanted: &str, control: &str) -> LessonResult<&'static str> {
    options
        .iter()
        .copied()
        .find(|o| *o == wanted)
        .ok_or_else(|| {
            LessonError::interaction(format!(
                "{KEY}: '{wanted}' is not a valid value for '{control}'"
            ))
        })
}

impl Visualization for Flexbox {
    fn key(&self) -> &'static str {
        KEY
    }

    fn title(&self) -> &'static str {
        "Flexbox Visualizer"
    }

    fn view(&self) -> serde_json::Value {
        serde_json::json!({
            "flex_direction": self.direction,
            "justify_content": self.justify,
            "align_items": self.align,
            "flex_wrap": self.wrap,
            "item_count": self.items,
            "main_axis": self.main_axis(),
            "visual_order": self.visual_order(),
            "container_css": self.container_css(),
        })
    }

    fn handle(&mut self, input: &Interaction) -> LessonResult<()> {
        match input {
            Interaction::Select { control, option } => {
                match control.as_str() {
                    "flex-direction" => self.direction = pick(DIRECTIONS, option, control)?,
                    "justify-content" => self.justify = pick(JUSTIFY, option, control)?,
                    "align-items" => self.align = pick(ALIGN, option, control)?,
                    "flex-wrap" => self.wrap = pick(WRAP, option, control)?,
                    _ => return Err(input.unsupported(KEY)),
                }
                Ok(())
            }
            Interaction::Set { control, value } if control == "items" => {
                if !value.is_finite() {
                    return Err(LessonError::interaction(format!(
                        "{KEY}: item count must be finite"
                    )));
                }
                self.items = value
                    .round()
                    .clamp(f64::from(MIN_ITEMS), f64::from(MAX_ITEMS)) as u8;
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
#[path = "../../tests/unit/widgets/flexbox.rs"]
mod tests;
