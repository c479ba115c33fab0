pub(crate) mod jitter;
pub(crate) mod wobbler;
