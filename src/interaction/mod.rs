pub(crate) mod box_drag;
pub(crate) mod capture;
pub(crate) mod hit;
pub(crate) mod pointer;
