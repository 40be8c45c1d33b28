pub(crate) mod assertions;
pub(crate) mod event;
pub(crate) mod info;
pub(crate) mod testing;
