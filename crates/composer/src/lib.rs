//! Wizard-style entity composer engine
//!
//! Headless core for stepped entity forms: a primary record is created first,
//! then child collections (price lists, warehouse locations, photos,
//! presentation configs) are attached under the server-assigned parent id.
//! Rendering, navigation and auth stay outside; the engine talks to the REST
//! collaborators through the `api` layer and exposes its state to whatever
//! front end drives it.

pub mod api;
pub mod catalog;
pub mod composer;
pub mod shared;

#[cfg(test)]
pub(crate) mod testing;
