pub(crate) mod dom;
pub(crate) mod lesson;
pub(crate) mod marker;
