//! Cross-crate scenarios: a full scan over scripted collaborators, and the
//! registry as the CLI drives it.

#[cfg(test)]
mod support;

#[cfg(test)]
mod pipeline;

#[cfg(test)]
mod registry;
