pub(crate) mod cache;
pub(crate) mod noise;
pub(crate) mod synth;
