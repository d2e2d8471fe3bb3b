//! Application layer reading the current window into a snapshot.

pub mod current;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_support;
