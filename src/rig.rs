pub(crate) mod deform;
pub(crate) mod pin;
pub(crate) mod weights;
