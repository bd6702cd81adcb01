use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use crate::foundation::error::{LessonError, LessonResult};

/// Builds one widget instance. Widgets take no props: all state is internal.
pub type WidgetFactory = fn() -> Box<dyn Visualization>;

/// A self-contained interactive teaching widget.
///
/// Implementations derive everything they display from their own initial values and from the
/// interactions they receive. Nothing crosses the widget boundary except [`Visualization::view`].
pub trait Visualization: std::fmt::Debug {
    /// Registry key this widget is registered under.
    fn key(&self) -> &'static str;

    /// Human-readable title.
    fn title(&self) -> &'static str;

    /// Current display state.
    fn view(&self) -> serde_json::Value;

    /// Apply one user interaction. Unknown controls and out-of-range input are rejected.
    fn handle(&mut self, input: &Interaction) -> LessonResult<()>;

    /// Advance local timers by `elapsed`.
    fn tick(&mut self, _elapsed: Duration) {}

    /// Time until the next scheduled state change, if one is pending.
    fn pending_transition(&self) -> Option<Duration> {
        None
    }

    /// Release local resources and cancel anything scheduled.
    fn unmount(&mut self) {}
}

/// A user interaction routed to a widget control.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interaction {
    /// Flip a boolean control.
    Toggle {
        /// Control name.
        control: String,
    },
    /// Pick one option of an enumerated control.
    Select {
        /// Control name.
        control: String,
        /// Chosen option.
        option: String,
    },
    /// Move a numeric control (slider).
    Set {
        /// Control name.
        control: String,
        /// New value.
        value: f64,
    },
    /// Replace the text of a text input.
    Input {
        /// Control name.
        control: String,
        /// New text.
        text: String,
    },
    /// Press a button.
    Press {
        /// Control name.
        control: String,
    },
}

impl Interaction {
    /// Build an [`Interaction::Toggle`].
    pub fn toggle(control: impl Into<String>) -> Self {
        Self::Toggle {
            control: control.into(),
        }
    }

    /// Build an [`Interaction::Select`].
    pub fn select(control: impl Into<String>, option: impl Into<String>) -> Self {
        Self::Select {
            control: control.into(),
            option: option.into(),
        }
    }

    /// Build an [`Interaction::Set`].
    pub fn set(control: impl Into<String>, value: f64) -> Self {
        Self::Set {
            control: control.into(),
            value,
        }
    }

    /// Build an [`Interaction::Input`].
    pub fn input(control: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Input {
            control: control.into(),
            text: text.into(),
        }
    }

    /// Build an [`Interaction::Press`].
    pub fn press(control: impl Into<String>) -> Self {
        Self::Press {
            control: control.into(),
        }
    }

    /// Name of the targeted control.
    pub fn control(&self) -> &str {
        match self {
            Self::Toggle { control }
            | Self::Select { control, .. }
            | Self::Set { control, .. }
            | Self::Input { control, .. }
            | Self::Press { control } => control,
        }
    }

    /// Error for a control the widget does not have.
    pub fn unsupported(&self, widget: &str) -> LessonError {
        LessonError::interaction(format!(
            "{widget}: unsupported interaction on control '{}'",
            self.control()
        ))
    }
}

/// Lifecycle of a mounted widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MountState {
    /// Accepting input and ticks.
    Live,
    /// The widget panicked; it renders nothing from now on.
    Faulted,
    /// Removed from the page; timers are cancelled.
    Unmounted,
}

/// One widget instance mounted at an embed position.
///
/// This is the fault-isolation boundary: a panic inside the widget is caught here and only this
/// embed goes dark. Every call into the instance goes through this boundary, including read-only
/// ones, so the state lives in a [`Cell`].
#[derive(Debug)]
pub struct MountedVisualization {
    key: String,
    instance_id: usize,
    instance: Box<dyn Visualization>,
    state: Cell<MountState>,
}

impl MountedVisualization {
    /// Build a fresh instance with `factory`, catching a panicking constructor.
    pub(crate) fn mount(
        key: &str,
        instance_id: usize,
        factory: WidgetFactory,
    ) -> Result<Self, String> {
        let instance = catch_unwind(factory).map_err(|p| panic_message(p.as_ref()))?;
        tracing::debug!(key, instance_id, "mounted visualization");
        Ok(Self {
            key: key.to_string(),
            instance_id,
            instance,
            state: Cell::new(MountState::Live),
        })
    }

    /// Registry key the instance was mounted for.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Per-render instance number (document order among mounted embeds).
    pub fn instance_id(&self) -> usize {
        self.instance_id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MountState {
        self.state.get()
    }

    fn is_live(&self) -> bool {
        self.state.get() == MountState::Live
    }

    /// Widget title, while live.
    pub fn title(&self) -> Option<&'static str> {
        if !self.is_live() {
            return None;
        }
        self.guarded(|w| w.title())
    }

    /// Current display state, or `None` once faulted or unmounted.
    pub fn view(&self) -> Option<serde_json::Value> {
        if !self.is_live() {
            return None;
        }
        self.guarded(|w| w.view())
    }

    /// Route one interaction to the widget.
    pub fn dispatch(&mut self, input: &Interaction) -> LessonResult<()> {
        self.ensure_live()?;
        match catch_unwind(AssertUnwindSafe(|| self.instance.handle(input))) {
            Ok(res) => res,
            Err(p) => {
                let msg = panic_message(p.as_ref());
                self.fault(&msg);
                Err(LessonError::interaction(format!(
                    "visualization '{}' faulted: {msg}",
                    self.key
                )))
            }
        }
    }

    /// Advance the widget's local timers. No-op unless live.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.is_live() {
            return;
        }
        if let Err(p) = catch_unwind(AssertUnwindSafe(|| self.instance.tick(elapsed))) {
            let msg = panic_message(p.as_ref());
            self.fault(&msg);
        }
    }

    /// Time until the widget's next scheduled change.
    pub fn pending_transition(&self) -> Option<Duration> {
        if !self.is_live() {
            return None;
        }
        self.guarded(|w| w.pending_transition()).flatten()
    }

    /// Remove the widget from the page, cancelling pending transitions.
    pub fn unmount(&mut self) {
        if self.state.get() == MountState::Unmounted {
            return;
        }
        let _ = catch_unwind(AssertUnwindSafe(|| self.instance.unmount()));
        self.state.set(MountState::Unmounted);
        tracing::debug!(key = %self.key, instance_id = self.instance_id, "unmounted visualization");
    }

    /// Run a read-only widget call; a panic faults the instance and yields `None`.
    fn guarded<T>(&self, f: impl FnOnce(&dyn Visualization) -> T) -> Option<T> {
        match catch_unwind(AssertUnwindSafe(|| f(self.instance.as_ref()))) {
            Ok(v) => Some(v),
            Err(p) => {
                self.fault(&panic_message(p.as_ref()));
                None
            }
        }
    }

    fn ensure_live(&self) -> LessonResult<()> {
        match self.state.get() {
            MountState::Live => Ok(()),
            MountState::Faulted => Err(LessonError::interaction(format!(
                "visualization '{}' has faulted",
                self.key
            ))),
            MountState::Unmounted => Err(LessonError::interaction(format!(
                "visualization '{}' is unmounted",
                self.key
            ))),
        }
    }

    fn fault(&self, msg: &str) {
        tracing::warn!(key = %self.key, instance_id = self.instance_id, panic = msg, "visualization faulted");
        self.state.set(MountState::Faulted);
    }
}

impl PartialEq for MountedVisualization {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.state() == other.state() && self.view() == other.view()
    }
}

impl Drop for MountedVisualization {
    fn drop(&mut self) {
        self.unmount();
    }
}

pub(crate) fn panic_message(p: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = p.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = p.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/contract.rs"]
mod tests;
