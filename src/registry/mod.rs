pub(crate) mod builtin;
pub(crate) mod table;
