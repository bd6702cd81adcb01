//! Built-in teaching widgets, one per concept family.

pub(crate) mod box_model;
pub(crate) mod css_intro;
pub(crate) mod flexbox;
pub(crate) mod request_flow;
pub(crate) mod specificity;
