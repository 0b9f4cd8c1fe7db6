pub(crate) mod boundary;
pub(crate) mod delaunay;
pub(crate) mod generate;
pub(crate) mod interior;
pub(crate) mod mask;
pub(crate) mod model;
