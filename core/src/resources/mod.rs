//! One method per backend operation, grouped by resource.
//!
//! Every method here is a direct call into the executor with a fixed HTTP
//! method and a route from the registry.

mod ads;
mod auth;
mod live;
mod marketplace;
mod messaging;
mod posts;
mod users;
mod wallet;
