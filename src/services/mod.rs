pub(crate) mod duplication;
