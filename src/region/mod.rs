pub(crate) mod constraint;
