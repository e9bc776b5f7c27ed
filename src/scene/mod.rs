pub(crate) mod court;
pub(crate) mod frame;
pub(crate) mod net;
pub(crate) mod title;
