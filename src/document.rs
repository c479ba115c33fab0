pub(crate) mod drawing;
pub(crate) mod style;
pub(crate) mod svg;
