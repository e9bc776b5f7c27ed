pub(crate) mod decode;
pub(crate) mod pending;
pub(crate) mod text;
